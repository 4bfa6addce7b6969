//! The parser module of simfile (.sm) format.
//!
//! This module consists of two phases: lexical analyzing and record parsing.
//!
//! `lex` module splits the source text into records `#TAG:param:...;`. It never fails, malformed text just yields
//! fewer or emptier parameters.
//!
//! `parse` module dispatches the records by tag name, accumulates the raw tempo lists and decodes the note data of
//! each chart. `timing` module provides [`timing::TimingData`], the tempo timeline built from the raw lists, and
//! `model` module provides the song descriptor and [`model::NoteGrid`].
//!
//! In detail, our policies are:
//!
//! - Support only UTF-8 (as required `&str` to input).
//! - Do not support editing simfile source text.
//! - Report recoverable anomalies as warnings and keep parsing. Only missing required chart data aborts the load.

pub mod command;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod lex;
pub mod model;
pub mod parse;
pub mod prelude;
pub mod timing;

use thiserror::Error;

use self::{
    model::Song,
    parse::{ParseErrorWithRange, ParseOutput, ParseWarningWithRange},
};

/// A warning occurred when parsing the simfile.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmWarning {
    /// A warning comes from record parsing, timing lists or note data.
    #[error("Warn: parse: {0}")]
    ParseWarning(#[from] ParseWarningWithRange),
}

/// Output of parsing a simfile.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct SmOutput {
    /// The parsed song, or the reason why the chart data is unusable.
    pub song: Result<Song, ParseErrorWithRange>,
    /// Warnings that occurred during parsing.
    pub warnings: Vec<SmWarning>,
}

/// Configuration of the whole parsing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Whether a backslash makes the following character literal in the tokenizer.
    pub escapes: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self { escapes: true }
    }
}

impl ParseConfig {
    /// Sets whether escaping with backslash is recognized.
    #[must_use]
    pub const fn escapes(mut self, escapes: bool) -> Self {
        self.escapes = escapes;
        self
    }
}

/// Returns the default [`ParseConfig`].
#[must_use]
pub fn default_config() -> ParseConfig {
    ParseConfig::default()
}

/// Parses a simfile from source text.
///
/// This function runs the tokenizer and the record parser in one step.
///
/// # Example
///
/// ```
/// use simfile_rs::sm::{command::Row, default_config, parse_sm, SmOutput};
///
/// let source = "#BPMS:0=120;\n#STOPS:4=1.0;\n#NOTES:dance-single::Hard:9::\n1000\n;";
/// let SmOutput { song, warnings } = parse_sm(source, default_config());
/// let song = song.unwrap();
/// assert_eq!(song.timing.tempo_at_row(Row(0)), 120.0);
/// assert_eq!(song.timing.elapsed_seconds_span_at_row(Row(192)), (2.0, 3.0));
/// assert!(warnings.is_empty());
/// ```
pub fn parse_sm(source: &str, config: ParseConfig) -> SmOutput {
    let lex_output = lex::parse(source, config.escapes);
    let ParseOutput {
        song,
        parse_warnings,
    } = Song::from_tokens(&lex_output.tokens);
    SmOutput {
        song,
        warnings: parse_warnings
            .into_iter()
            .map(SmWarning::ParseWarning)
            .collect(),
    }
}
