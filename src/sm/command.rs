//! Definitions of the primitive values shared by the simfile records.
//!
//! - [`time`] has [`Row`], the fixed-point musical position, and the clock-time parser of `#SAMPLESTART`.
//! - [`value`] has the parsers of `row=value` lists used by the timing tags.
//! - [`mixin`] has [`mixin::SourceRangeMixin`], attaching a source span to tokens, warnings and errors.

pub mod mixin;
pub mod time;
pub mod value;

pub use self::time::{BEATS_PER_MEASURE, ROWS_PER_BEAT, Row};
