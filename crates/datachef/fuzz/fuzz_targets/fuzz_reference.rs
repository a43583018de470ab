//! Fuzz target for reference parsing.
//!
//! Parsing must never panic, any accepted coordinate must survive a
//! render and parse round trip, and resolving against a tiny table must
//! return promptly however large the reference.

#![no_main]

use datachef::Coord;
use datachef::selection::{CellRange, from_reference, reference_to_cells, to_reference};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(coord) = from_reference(input) {
        let rendered = to_reference(coord.x, coord.y);
        assert_eq!(from_reference(&rendered).ok(), Some(coord));
    }

    if let Ok(range) = CellRange::parse(input) {
        assert!(range.start().x <= range.end().x);
        assert!(range.start().y <= range.end().y);
        let _ = reference_to_cells(input, &[Coord::new(0, 0), Coord::new(1, 0)]);
    }
});
