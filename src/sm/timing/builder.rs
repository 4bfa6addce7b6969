//! Builder of the tempo timeline, merging the raw `#BPMS` and `#STOPS` lists into tempo, pause and skip segments.
//!
//! Real time cannot run backward, so a negative tempo or a negative pause becomes a skip: the rows where the time
//! would go back, and the rows until the time catches up again, are crossed with no elapsed time. An instant tempo,
//! beyond [`INSTANT_TEMPO`], is a skip until the next tempo change.

use itertools::Itertools;

use super::{DEFAULT_TEMPO, INSTANT_TEMPO, segment::TimingSegment};
use crate::sm::command::Row;

/// The merged timeline of tempo, pause and skip segments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoTimeline {
    /// Segments in the order of rows, ready for [`super::TimingData::insert`].
    pub segments: Vec<TimingSegment>,
    /// Seconds to add to the global offset, from pauses before row 0.
    pub offset_adjustment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Change {
    Tempo(f64),
    Pause(f64),
}

fn is_normal_tempo(bpm: f64) -> bool {
    0.0 < bpm && bpm <= INSTANT_TEMPO
}

fn is_instant_tempo(bpm: f64) -> bool {
    INSTANT_TEMPO < bpm
}

/// Builds the tempo timeline from raw tempo changes and pauses, both `(row, value)` with no zero value.
///
/// The lists need not be sorted. They are sorted stably by row, and on the same row tempo changes are processed
/// before pauses.
#[must_use]
pub fn build_tempo_timeline(tempos: &[(Row, f64)], pauses: &[(Row, f64)]) -> TempoTimeline {
    let mut tempos = tempos.to_vec();
    tempos.sort_by_key(|&(row, _)| row);
    let mut pauses = pauses.to_vec();
    pauses.sort_by_key(|&(row, _)| row);

    let first_pause = pauses.partition_point(|&(row, _)| row < Row::ZERO);
    let offset_adjustment = -pauses[..first_pause]
        .iter()
        .map(|&(_, seconds)| seconds)
        .sum::<f64>();
    let pauses = &pauses[first_pause..];

    let first_tempo = tempos.partition_point(|&(row, _)| row < Row::ZERO);
    let below_zero = first_tempo.checked_sub(1).map(|last| tempos[last].1);
    let mut tempos = tempos.split_off(first_tempo);
    if tempos.first().is_none_or(|&(row, _)| row != Row::ZERO) {
        match (below_zero, tempos.first_mut()) {
            (Some(bpm), _) => tempos.insert(0, (Row::ZERO, bpm)),
            (None, Some(first)) if is_normal_tempo(first.1) => first.0 = Row::ZERO,
            (None, _) => tempos.insert(0, (Row::ZERO, DEFAULT_TEMPO)),
        }
    }

    let mut builder = TimelineBuilder::default();
    let changes = tempos
        .iter()
        .map(|&(row, bpm)| (row, Change::Tempo(bpm)))
        .merge_by(
            pauses
                .iter()
                .map(|&(row, seconds)| (row, Change::Pause(seconds))),
            |tempo, pause| tempo.0 <= pause.0,
        );
    for (row, change) in changes {
        builder.process(row, change);
    }
    TempoTimeline {
        segments: builder.finish(),
        offset_adjustment,
    }
}

struct TimelineBuilder {
    segments: Vec<TimingSegment>,
    tempo: f64,
    last_emitted_tempo: Option<f64>,
    prev_row: Row,
    skip_start: Option<Row>,
    /// Seconds the real time is behind the time at the skip start. The skip lasts while it is negative.
    debt: f64,
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self {
            segments: vec![],
            tempo: DEFAULT_TEMPO,
            last_emitted_tempo: None,
            prev_row: Row::ZERO,
            skip_start: None,
            debt: 0.0,
        }
    }
}

impl TimelineBuilder {
    fn process(&mut self, row: Row, change: Change) {
        self.accrue(row);
        match change {
            Change::Tempo(bpm) => self.on_tempo(row, bpm),
            Change::Pause(seconds) => self.on_pause(row, seconds),
        }
    }

    fn accrue(&mut self, row: Row) {
        if self.skip_start.is_some() && !is_instant_tempo(self.tempo) {
            self.debt += (row - self.prev_row).to_beat() * 60.0 / self.tempo;
            if is_normal_tempo(self.tempo) && 0.0 <= self.debt {
                let end = row - Row::from_beat(self.debt * self.tempo / 60.0);
                self.close(end, 0.0);
            }
        }
        self.prev_row = row;
    }

    fn on_tempo(&mut self, row: Row, bpm: f64) {
        if !is_normal_tempo(bpm) {
            self.open(row);
            self.tempo = bpm;
            return;
        }
        self.tempo = bpm;
        if self.skip_start.is_none() {
            self.emit_tempo(row);
        } else if 0.0 <= self.debt {
            self.close(row, self.debt);
        }
    }

    fn on_pause(&mut self, row: Row, seconds: f64) {
        if seconds < 0.0 {
            self.open(row);
            self.debt += seconds;
            return;
        }
        if self.skip_start.is_none() {
            self.segments.push(TimingSegment::pause(row, seconds));
            return;
        }
        self.debt += seconds;
        if is_normal_tempo(self.tempo) && 0.0 <= self.debt {
            self.close(row, self.debt);
        }
    }

    fn emit_tempo(&mut self, row: Row) {
        self.segments.push(TimingSegment::tempo(row, self.tempo));
        self.last_emitted_tempo = Some(self.tempo);
    }

    /// Opens a skip at `row` unless one is open already.
    fn open(&mut self, row: Row) {
        if self.skip_start.is_some() {
            return;
        }
        if self.last_emitted_tempo.is_none() {
            self.segments
                .push(TimingSegment::tempo(row, DEFAULT_TEMPO));
            self.last_emitted_tempo = Some(DEFAULT_TEMPO);
        }
        self.skip_start = Some(row);
        self.debt = 0.0;
    }

    /// Closes the open skip at `end`, restating the current tempo if it changed during the skip and placing the
    /// `leftover` seconds as a pause there.
    fn close(&mut self, end: Row, leftover: f64) {
        let Some(start) = self.skip_start.take() else {
            return;
        };
        let end = end.max(start);
        if start < end {
            self.segments.push(TimingSegment::skip(start, end - start));
        }
        if is_normal_tempo(self.tempo) && self.last_emitted_tempo != Some(self.tempo) {
            self.emit_tempo(end);
        }
        if 0.0 < leftover {
            self.segments.push(TimingSegment::pause(end, leftover));
        }
        self.debt = 0.0;
    }

    fn finish(mut self) -> Vec<TimingSegment> {
        if self.skip_start.is_some() {
            let end = if is_normal_tempo(self.tempo) {
                self.prev_row + Row::from_beat(-self.debt * self.tempo / 60.0)
            } else {
                Row::INFINITE
            };
            self.close(end, 0.0);
        }
        self.segments
    }
}
