//! Fetching sources over HTTP(S).

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{DataChefError, Result};

use super::source::Format;

/// Request timeout for remote sources.
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Download the body of `url`.
pub fn fetch(url: &str) -> Result<Vec<u8>> {
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| DataChefError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(DataChefError::FileInput(format!(
            "fetching '{}' returned status {}",
            url,
            response.status()
        )));
    }

    Ok(response.bytes()?.to_vec())
}

/// Format implied by the extension of a URL's path. Defaults to delimited text.
pub fn format_for_url(url: &str) -> Format {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let path = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);

    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Format::from_extension)
        .unwrap_or(Format::Delimited)
}
