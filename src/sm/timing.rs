//! Timing of the song: the tempo timeline and the other row-based segments.
//!
//! `builder` module merges the raw `#BPMS` and `#STOPS` lists into tempo, pause and skip segments. `data` module
//! stores them with the other segment kinds in [`TimingData`] and converts between beats and elapsed seconds.

pub mod builder;
pub mod data;
pub mod segment;

pub use self::{
    builder::{TempoTimeline, build_tempo_timeline},
    data::TimingData,
    segment::{SegmentEffect, SegmentKind, SegmentValue, SpeedUnit, TimingSegment},
};

/// The tempo of a song declaring none, and the tempo before the first one.
pub const DEFAULT_TEMPO: f64 = 60.0;

/// The tempo beyond which rows are crossed with no elapsed time.
pub const INSTANT_TEMPO: f64 = 9_999_999.0;
