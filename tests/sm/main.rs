//! Tests for `simfile_rs::sm`.

mod diagnostics_test;
mod files;
mod lex_records;
mod timing;

use simfile_rs::sm::prelude::*;

/// Parses the source with the default config, asserting it has no warnings.
pub fn parse_clean(source: &str) -> Song {
    let SmOutput { song, warnings } = parse_sm(source, default_config());
    pretty_assertions::assert_eq!(warnings, Vec::<SmWarning>::new());
    song.expect("the song must be parsed")
}

/// Asserts two seconds are equal in floating point error.
pub fn assert_seconds(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected} but got {actual}"
    );
}
