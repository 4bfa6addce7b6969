//! Fancy diagnostics support using `ariadne`.
//!
//! This module converts the warnings and errors carrying [`SourceRangeMixin`] (such as [`ParseWarningWithRange`],
//! [`ParseErrorWithRange`] and the aggregated [`SmWarning`]) to `ariadne::Report`. The byte span of the record lets
//! ariadne calculate rows and columns for display.
//!
//! # Usage Example
//!
//! ```rust
//! use simfile_rs::sm::{default_config, diagnostics::emit_sm_warnings, parse_sm};
//!
//! let source = "#BPMS:0=120,4=0;\n#NOTES:dance-single::Easy:1::\n2000\n;";
//! let output = parse_sm(source, default_config());
//!
//! // Output all warnings
//! emit_sm_warnings("test.sm", source, &output.warnings);
//! ```
//!
//! [`SourceRangeMixin`]: crate::sm::command::mixin::SourceRangeMixin

use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::sm::{
    SmWarning,
    parse::{ParseErrorWithRange, ParseWarningWithRange},
};

/// Simple source container that holds the filename and source text.
///
/// # Usage Example
///
/// ```rust
/// use simfile_rs::sm::diagnostics::SimpleSource;
///
/// let source_text = "#TITLE:test;\n#ARTIST:composer;\n";
/// let source = SimpleSource::new("test.sm", source_text);
///
/// assert_eq!(source.text(), source_text);
/// ```
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned errors to `ariadne::Report`.
pub trait ToAriadne {
    /// Convert error to ariadne Report.
    ///
    /// # Parameters
    /// * `src` - Source file container (used for filename, ariadne handles row/column calculation)
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)>;
}

fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: Range<usize>,
    title: String,
    color: Color,
) -> Report<'a, (String, Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_message(title)
        .with_label(Label::new((filename, range)).with_color(color))
        .finish()
}

impl ToAriadne for ParseWarningWithRange {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        build_report(
            src,
            ReportKind::Warning,
            self.range(),
            format!("parse: {}", self.content()),
            Color::Blue,
        )
    }
}

impl ToAriadne for ParseErrorWithRange {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        build_report(
            src,
            ReportKind::Error,
            self.range(),
            self.content().to_string(),
            Color::Red,
        )
    }
}

impl ToAriadne for SmWarning {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        match self {
            Self::ParseWarning(warning) => warning.to_report(src),
        }
    }
}

/// Convenience method: batch render [`SmWarning`] list to the standard error.
///
/// # Parameters
/// * `name` - Name of the source file, used for display in diagnostic information
/// * `source` - Complete simfile source text
/// * `warnings` - List of warnings to display
pub fn emit_sm_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a SmWarning>,
) {
    let simple = SimpleSource::new(name, source);
    let ariadne_source = Source::from(source);
    for warning in warnings {
        let report = warning.to_report(&simple);
        let _ = report.eprint((name.to_string(), ariadne_source.clone()));
    }
}

/// Collect `ariadne::Report` instances for a list of [`SmWarning`] without printing.
#[must_use]
pub fn collect_sm_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a SmWarning>,
) -> Vec<Report<'a, (String, Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    warnings
        .into_iter()
        .map(|warning| warning.to_report(&simple))
        .collect()
}
