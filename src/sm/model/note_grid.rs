//! This module introduces struct [`NoteGrid`], the sparse store of note events per lane.

use std::{
    collections::BTreeMap,
    ops::{Bound, RangeBounds},
};

use super::note::{NoteEvent, NoteKind};
use crate::sm::command::Row;

/// Note events of a chart, one row-ordered map per lane.
///
/// The number of lanes is fixed at construction unless [`NoteGrid::set_lane_count`] is called. A map never holds
/// [`NoteEvent::EMPTY`], writing it removes the entry instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteGrid {
    lanes: Vec<BTreeMap<Row, NoteEvent>>,
}

impl NoteGrid {
    /// Creates an empty grid with `lane_count` lanes.
    #[must_use]
    pub fn new(lane_count: usize) -> Self {
        Self {
            lanes: vec![BTreeMap::new(); lane_count],
        }
    }

    /// Returns the number of lanes.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Returns the note at `lane` and `row`, or [`NoteEvent::EMPTY`] if there is none or the lane is out of range.
    #[must_use]
    pub fn note_at(&self, lane: usize, row: Row) -> NoteEvent {
        self.lanes
            .get(lane)
            .and_then(|notes| notes.get(&row))
            .copied()
            .unwrap_or(NoteEvent::EMPTY)
    }

    /// Writes the note at `lane` and `row`, returning the note which was there. An empty note removes the entry.
    ///
    /// Writing to a lane out of range does nothing.
    pub fn set_note(&mut self, lane: usize, row: Row, note: NoteEvent) -> Option<NoteEvent> {
        let notes = self.lanes.get_mut(lane)?;
        if note.is_empty() {
            notes.remove(&row)
        } else {
            notes.insert(row, note)
        }
    }

    /// Removes the note at `lane` and `row`.
    pub fn remove_note(&mut self, lane: usize, row: Row) -> Option<NoteEvent> {
        self.lanes.get_mut(lane)?.remove(&row)
    }

    /// Iterates the notes of `lane` in `range` in the order of rows. Call `.rev()` to walk backward.
    pub fn notes_in_range(
        &self,
        lane: usize,
        range: impl RangeBounds<Row>,
    ) -> impl DoubleEndedIterator<Item = (Row, &NoteEvent)> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.lanes
            .get(lane)
            .into_iter()
            .flat_map(move |notes| notes.range(bounds))
            .map(|(&row, note)| (row, note))
    }

    /// Iterates all the notes of `lane`.
    pub fn lane_notes(&self, lane: usize) -> impl DoubleEndedIterator<Item = (Row, &NoteEvent)> {
        self.notes_in_range(lane, ..)
    }

    /// Returns the first note of `lane` strictly after `row`.
    #[must_use]
    pub fn next_note_after(&self, lane: usize, row: Row) -> Option<(Row, &NoteEvent)> {
        self.notes_in_range(lane, (Bound::Excluded(row), Bound::Unbounded))
            .next()
    }

    /// Returns the last note of `lane` strictly before `row`.
    #[must_use]
    pub fn prev_note_before(&self, lane: usize, row: Row) -> Option<(Row, &NoteEvent)> {
        self.notes_in_range(lane, ..row).next_back()
    }

    /// Returns the number of notes in `lane`.
    #[must_use]
    pub fn lane_len(&self, lane: usize) -> usize {
        self.lanes.get(lane).map_or(0, BTreeMap::len)
    }

    /// Returns the number of notes in all lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.iter().map(BTreeMap::len).sum()
    }

    /// Whether no lane has a note.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(BTreeMap::is_empty)
    }

    /// Removes all the notes, keeping the lanes.
    pub fn clear(&mut self) {
        self.lanes.iter_mut().for_each(BTreeMap::clear);
    }

    /// Changes the number of lanes. Lanes beyond `lane_count` are dropped, and new lanes are empty. The other lanes
    /// are untouched.
    pub fn set_lane_count(&mut self, lane_count: usize) {
        self.lanes.resize_with(lane_count, BTreeMap::new);
    }

    /// Marks every note with its player, `lane / lanes_per_player`.
    pub fn assign_owners(&mut self, lanes_per_player: usize) {
        let lanes_per_player = lanes_per_player.max(1);
        for (lane, notes) in self.lanes.iter_mut().enumerate() {
            let owner = u8::try_from(lane / lanes_per_player).ok();
            notes.values_mut().for_each(|note| note.owner = owner);
        }
    }

    /// Returns the last row occupied by a note, including the tails of holds.
    #[must_use]
    pub fn last_row(&self) -> Option<Row> {
        self.lanes
            .iter()
            .filter_map(|notes| {
                notes
                    .iter()
                    .map(|(&row, note)| note.tail_row(row).unwrap_or(row))
                    .max()
            })
            .max()
    }

    /// Counts the notes of the kind in all lanes.
    #[must_use]
    pub fn count_kind(&self, kind: NoteKind) -> usize {
        self.lanes
            .iter()
            .flat_map(BTreeMap::values)
            .filter(|note| note.kind == kind)
            .count()
    }
}
