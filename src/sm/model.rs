//! Song data parsed from a simfile.
//!
//! [`Song`] is the aggregate of the descriptive fields, the [`TimingData`] and the [`Chart`]s. It is built once per
//! load and only the global offset may be adjusted afterwards.

pub mod chart;
pub mod metadata;
pub mod note;
pub mod note_grid;

use crate::sm::timing::TimingData;

pub use self::{
    chart::{Chart, Difficulty, StepsType},
    metadata::{DisplayBpm, Selectable, SongMetadata},
    note::{HoldKind, NoteEvent, NoteKind},
    note_grid::NoteGrid,
};

/// A score data aggregate of simfile format.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Song {
    /// The descriptive texts.
    pub metadata: SongMetadata,
    /// The tempo timeline and the other timing segments.
    pub timing: TimingData,
    /// The charts in the order of the `#NOTES` records.
    pub charts: Vec<Chart>,
    /// `#DISPLAYBPM`
    pub display_bpm: DisplayBpm,
    /// Start of the preview in seconds. `#SAMPLESTART`
    pub sample_start: f64,
    /// Length of the preview in seconds. `#SAMPLELENGTH`
    pub sample_length: f64,
    /// `#SELECTABLE`
    pub selectable: Selectable,
}

impl Song {
    /// Returns the tempo range to be shown, or `None` for [`DisplayBpm::Random`].
    #[must_use]
    pub fn display_bpm_range(&self) -> Option<(f64, f64)> {
        match self.display_bpm {
            DisplayBpm::Actual => self.timing.tempo_range(),
            DisplayBpm::Specified { min, max } => Some((min, max)),
            DisplayBpm::Random => None,
        }
    }

    /// Finds the chart of the steps type and the difficulty.
    #[must_use]
    pub fn chart(&self, steps_type: &StepsType, difficulty: Difficulty) -> Option<&Chart> {
        self.charts
            .iter()
            .find(|chart| &chart.steps_type == steps_type && chart.difficulty == difficulty)
    }
}
