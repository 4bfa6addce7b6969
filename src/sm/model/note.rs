//! Definitions of the note event stored in [`super::NoteGrid`].

use crate::sm::command::Row;

/// The kind of a note event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteKind {
    /// No note. A grid never stores it.
    #[default]
    Empty,
    /// A note to be hit. `1`
    Tap,
    /// The start of a hold or roll. `2`, `4`
    HoldHead,
    /// The end of a hold or roll. `3`
    ///
    /// This appears only while decoding, a stored head carries its length in [`NoteEvent::duration`] instead.
    HoldTail,
    /// A note to be avoided. `M`
    Mine,
    /// A note to be released. `L`
    Lift,
    /// A modifier trigger.
    Attack,
    /// A sound played automatically. `K`
    AutoKeysound,
    /// A note which is shown but never judged. `F`
    Fake,
}

/// The way a [`NoteKind::HoldHead`] is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HoldKind {
    /// Kept by holding the button.
    Hold,
    /// Kept by hitting the button repeatedly.
    Roll,
}

/// A playable event on a lane at a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteEvent {
    /// The kind of the event.
    pub kind: NoteKind,
    /// The way of holding, only for [`NoteKind::HoldHead`].
    pub hold: Option<HoldKind>,
    /// Rows from the head to the tail, only for [`NoteKind::HoldHead`].
    pub duration: Row,
    /// The player owning the lane, `None` for single player charts.
    pub owner: Option<u8>,
}

impl Default for NoteEvent {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl NoteEvent {
    /// The absence of a note.
    pub const EMPTY: Self = Self::new(NoteKind::Empty);

    /// The duration of a head whose tail is not found yet.
    pub const OPEN_DURATION: Row = Row::INFINITE;

    /// Creates a note of the kind, with no hold information.
    #[must_use]
    pub const fn new(kind: NoteKind) -> Self {
        Self {
            kind,
            hold: None,
            duration: Row::ZERO,
            owner: None,
        }
    }

    /// Creates a hold head with the duration.
    #[must_use]
    pub const fn hold_head(hold: HoldKind, duration: Row) -> Self {
        Self {
            kind: NoteKind::HoldHead,
            hold: Some(hold),
            duration,
            owner: None,
        }
    }

    /// Whether this is [`NoteEvent::EMPTY`] in effect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind == NoteKind::Empty
    }

    /// Whether this is a hold head still waiting for its tail.
    #[must_use]
    pub fn is_open_hold(&self) -> bool {
        self.kind == NoteKind::HoldHead && self.duration == Self::OPEN_DURATION
    }

    /// Returns the row of the tail if this is a hold head placed at `row`.
    #[must_use]
    pub fn tail_row(&self, row: Row) -> Option<Row> {
        (self.kind == NoteKind::HoldHead && !self.is_open_hold()).then(|| row + self.duration)
    }
}
