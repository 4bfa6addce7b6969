//! Definitions of timing segments, the typed events of [`super::TimingData`].

use crate::sm::command::Row;

/// How long a segment affects the chart from its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentEffect {
    /// Takes effect only at its row, such as a pause.
    Row,
    /// Takes effect over a bounded range of rows from its row, such as a skip.
    Range,
    /// Takes effect until the next segment of the same kind, such as a tempo.
    Indefinite,
}

/// The kind of a segment, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    /// See [`SegmentValue::Tempo`].
    Tempo,
    /// See [`SegmentValue::Pause`].
    Pause,
    /// See [`SegmentValue::Delay`].
    Delay,
    /// See [`SegmentValue::TimeSignature`].
    TimeSignature,
    /// See [`SegmentValue::Skip`].
    Skip,
    /// See [`SegmentValue::Label`].
    Label,
    /// See [`SegmentValue::TickCount`].
    TickCount,
    /// See [`SegmentValue::Combo`].
    Combo,
    /// See [`SegmentValue::Speed`].
    Speed,
    /// See [`SegmentValue::Scroll`].
    Scroll,
    /// See [`SegmentValue::Fake`].
    Fake,
}

impl SegmentKind {
    /// All of the kinds, in the order of their storage slots.
    pub const ALL: [Self; 11] = [
        Self::Tempo,
        Self::Pause,
        Self::Delay,
        Self::TimeSignature,
        Self::Skip,
        Self::Label,
        Self::TickCount,
        Self::Combo,
        Self::Speed,
        Self::Scroll,
        Self::Fake,
    ];

    /// How long the segments of this kind take effect.
    #[must_use]
    pub const fn effect(self) -> SegmentEffect {
        match self {
            Self::Pause | Self::Delay => SegmentEffect::Row,
            Self::Skip | Self::Fake => SegmentEffect::Range,
            Self::Tempo
            | Self::TimeSignature
            | Self::Label
            | Self::TickCount
            | Self::Combo
            | Self::Speed
            | Self::Scroll => SegmentEffect::Indefinite,
        }
    }

    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

/// The unit of [`SegmentValue::Speed`] transition length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedUnit {
    /// The transition length is in beats.
    #[default]
    Beats,
    /// The transition length is in seconds.
    Seconds,
}

/// The payload of a timing segment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentValue {
    /// Beats per minute from its row. `#BPMS`
    Tempo {
        /// Beats per minute, positive.
        bpm: f64,
    },
    /// Time stands still for a while after the notes on its row. `#STOPS`
    Pause {
        /// Length of the pause.
        seconds: f64,
    },
    /// Time stands still for a while before the notes on its row. `#DELAYS`
    Delay {
        /// Length of the delay.
        seconds: f64,
    },
    /// The measure layout from its row. `#TIMESIGNATURES`
    TimeSignature {
        /// Beats in a measure, at least 1.
        numerator: u32,
        /// The note value of a beat, at least 1.
        denominator: u32,
    },
    /// Rows crossed with no elapsed time. `#WARPS`, or synthesized from negative tempos and pauses.
    Skip {
        /// Length of the skipped range.
        length: Row,
    },
    /// A named position. `#LABELS`
    Label {
        /// The label text.
        name: String,
    },
    /// Hold checkpoints per beat. `#TICKCOUNTS`
    TickCount {
        /// Checkpoints per beat.
        ticks: u32,
    },
    /// Combo multipliers. `#COMBOS`
    Combo {
        /// Combo added by a hit.
        hit: u32,
        /// Combo added by a miss.
        miss: u32,
    },
    /// Scroll speed multiplier with a transition. `#SPEEDS`
    Speed {
        /// The multiplier.
        ratio: f64,
        /// Length of the transition to the multiplier.
        delay: f64,
        /// Unit of `delay`.
        unit: SpeedUnit,
    },
    /// Scroll position multiplier. `#SCROLLS`
    Scroll {
        /// The multiplier.
        ratio: f64,
    },
    /// Notes in the range are not judged. `#FAKES`
    Fake {
        /// Length of the range.
        length: Row,
    },
}

impl SegmentValue {
    /// Returns the kind of the value.
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        match self {
            Self::Tempo { .. } => SegmentKind::Tempo,
            Self::Pause { .. } => SegmentKind::Pause,
            Self::Delay { .. } => SegmentKind::Delay,
            Self::TimeSignature { .. } => SegmentKind::TimeSignature,
            Self::Skip { .. } => SegmentKind::Skip,
            Self::Label { .. } => SegmentKind::Label,
            Self::TickCount { .. } => SegmentKind::TickCount,
            Self::Combo { .. } => SegmentKind::Combo,
            Self::Speed { .. } => SegmentKind::Speed,
            Self::Scroll { .. } => SegmentKind::Scroll,
            Self::Fake { .. } => SegmentKind::Fake,
        }
    }
}

/// A typed event of the timing data at a row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingSegment {
    /// The row where the segment starts.
    pub row: Row,
    /// The payload.
    pub value: SegmentValue,
}

impl TimingSegment {
    /// Creates a new segment.
    #[must_use]
    pub const fn new(row: Row, value: SegmentValue) -> Self {
        Self { row, value }
    }

    /// Creates a tempo segment.
    #[must_use]
    pub const fn tempo(row: Row, bpm: f64) -> Self {
        Self::new(row, SegmentValue::Tempo { bpm })
    }

    /// Creates a pause segment.
    #[must_use]
    pub const fn pause(row: Row, seconds: f64) -> Self {
        Self::new(row, SegmentValue::Pause { seconds })
    }

    /// Creates a skip segment.
    #[must_use]
    pub const fn skip(row: Row, length: Row) -> Self {
        Self::new(row, SegmentValue::Skip { length })
    }

    /// Returns the kind of the segment.
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        self.value.kind()
    }

    /// Returns the row where the affected range ends (exclusive), only for [`SegmentEffect::Range`] segments.
    #[must_use]
    pub fn range_end(&self) -> Option<Row> {
        match self.value {
            SegmentValue::Skip { length } | SegmentValue::Fake { length } => {
                Some(self.row + length)
            }
            _ => None,
        }
    }
}
