//! Fuzz target for JSON workbooks read into live tables.

#![no_main]

use std::io::Write;

use datachef::DataChef;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile_json() {
        if temp_file.write_all(data).is_ok() {
            let chef = DataChef::new();
            if let Ok(registry) = chef.acquire(temp_file.path()) {
                for table in registry.tables() {
                    let _ = table.excel_reference();
                }
            }
        }
    }
});

fn tempfile_json() -> std::io::Result<tempfile::NamedTempFile> {
    tempfile::Builder::new().suffix(".json").tempfile()
}
