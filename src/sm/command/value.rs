//! Parsers of the comma separated `row=value[=value...]` lists, such as `#BPMS:0=120,64=240;`.

use super::time::{ROWS_PER_BEAT, Row};

/// A position written on the left hand side of a `row=value` entry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowPosition {
    /// A beat, such as `16.5`.
    Beat(f64),
    /// A raw sub-row count wrapped by `r` or `R`, such as `r96`. It is counted in the file-declared resolution.
    SubRows(i64),
}

impl RowPosition {
    /// Parses a position token. A position beyond [`Row::INFINITE`] rows away from row 0 is rejected.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let stripped = token.trim_matches(['r', 'R']);
        if stripped.len() != token.len() {
            return stripped
                .parse::<i64>()
                .ok()
                .filter(|sub_rows| sub_rows.unsigned_abs() <= Row::INFINITE.0.unsigned_abs())
                .map(Self::SubRows);
        }
        parse_f64(token)
            .filter(|beat| (beat * ROWS_PER_BEAT as f64).abs() <= Row::INFINITE.0 as f64)
            .map(Self::Beat)
    }

    /// Resolves the position into a [`Row`], with `rows_per_beat` declared by `#ROWSPERBEAT`.
    #[must_use]
    pub fn resolve(self, rows_per_beat: i64) -> Row {
        match self {
            Self::Beat(beat) => Row::from_beat(beat),
            Self::SubRows(sub_rows) => Row::from_sub_rows(sub_rows, rows_per_beat),
        }
    }
}

/// An entry of a `row=value` list with its values not interpreted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RowEntry<'a> {
    /// The position of the entry.
    pub position: RowPosition,
    /// The trimmed values after the position.
    pub values: Vec<&'a str>,
}

/// Splits a list into non-blank trimmed entries.
pub fn list_entries(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

/// Parses an entry `row=value[=value...]` having between `min_values` and `max_values` values.
///
/// Returns `None` if the entry has a wrong number of parts or an invalid position.
#[must_use]
pub fn parse_row_entry(entry: &str, min_values: usize, max_values: usize) -> Option<RowEntry<'_>> {
    let mut parts = entry.split('=').map(str::trim);
    let position = RowPosition::parse(parts.next()?)?;
    let values: Vec<&str> = parts.collect();
    (min_values..=max_values)
        .contains(&values.len())
        .then_some(RowEntry { position, values })
}

/// Parses a finite floating point number, ignoring surrounding whitespace.
#[must_use]
pub fn parse_f64(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
