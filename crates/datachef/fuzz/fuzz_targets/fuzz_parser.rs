//! Fuzz target for the delimited text parser.
//!
//! Delimiter detection and parsing must never panic on malformed input.

#![no_main]

use datachef::input::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    if let Ok((grid, _)) = parser.parse_bytes(data) {
        assert!(!grid.is_empty());
    }
});
