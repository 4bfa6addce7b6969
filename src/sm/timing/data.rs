//! This module introduces struct [`TimingData`], which stores the timing segments of a song and answers the
//! conversions between beats and elapsed seconds.

use itertools::Itertools;

use super::{
    DEFAULT_TEMPO,
    segment::{SegmentEffect, SegmentKind, SegmentValue, TimingSegment},
};
use crate::sm::command::{ROWS_PER_BEAT, Row};

/// The timing segments of a song, one row-sorted sequence per [`SegmentKind`], and the global offset.
///
/// Each sequence is strictly ascending by row with at most one segment on a row. Two adjacent
/// [`SegmentEffect::Indefinite`] segments never have an equal value, because the later one would change nothing.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingData {
    segments: [Vec<TimingSegment>; SegmentKind::ALL.len()],
    /// Seconds of the music before beat 0 is at elapsed time 0. `#OFFSET`
    global_offset: f64,
}

/// Which side of the pauses and delays on the target row is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum AtTarget {
    /// Before the delays and the pauses.
    Arrival,
    /// After the delays, before the pauses. It is when a note on the row is to be hit.
    Note,
    /// After the delays and the pauses.
    Departure,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TimelineEvent {
    Tempo(f64),
    Skip(Row),
    Delay(f64),
    Pause(f64),
}

impl TimelineEvent {
    /// Processing order of events on the same row.
    const fn order(self) -> u8 {
        match self {
            Self::Tempo(_) => 0,
            Self::Skip(_) => 1,
            Self::Delay(_) => 2,
            Self::Pause(_) => 3,
        }
    }
}

fn effective_index_in(segments: &[TimingSegment], row: Row) -> Option<usize> {
    if segments.is_empty() {
        return None;
    }
    Some(
        segments
            .partition_point(|segment| segment.row <= row)
            .saturating_sub(1),
    )
}

/// Seconds spent from row `from` to row `to` at `bpm`, except rows before `skip_end`.
fn seconds_between(from: f64, to: f64, bpm: f64, skip_end: f64) -> f64 {
    let from = from.max(skip_end);
    if to <= from {
        return 0.0;
    }
    (to - from) / ROWS_PER_BEAT as f64 * 60.0 / bpm
}

impl TimingData {
    /// Creates an empty timing data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sorted segments of the kind.
    #[must_use]
    pub fn segments(&self, kind: SegmentKind) -> &[TimingSegment] {
        &self.segments[kind.slot()]
    }

    /// Returns `true` if no segment is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(Vec::is_empty)
    }

    /// Finds the index `m` of the segment in effect at `row`, that is `segs[m].row <= row < segs[m + 1].row`. A row
    /// before the first segment maps to 0, and `None` is returned only if there is no segment of the kind.
    #[must_use]
    pub fn effective_index(&self, kind: SegmentKind, row: Row) -> Option<usize> {
        effective_index_in(self.segments(kind), row)
    }

    /// Returns the segment of the kind in effect at `row`.
    #[must_use]
    pub fn segment_at(&self, kind: SegmentKind, row: Row) -> Option<&TimingSegment> {
        let index = self.effective_index(kind, row)?;
        self.segments(kind).get(index)
    }

    /// Inserts a segment, replacing the one on the same row and eliding redundant [`SegmentEffect::Indefinite`]
    /// segments.
    ///
    /// An indefinite segment equal to the value in effect before its row changes nothing, so it is not stored. If it
    /// equals the next stored segment instead, the next one is moved back to the new row.
    pub fn insert(&mut self, segment: TimingSegment) {
        let effect = segment.kind().effect();
        let segs = &mut self.segments[segment.kind().slot()];
        if segs.is_empty() {
            segs.push(segment);
            return;
        }
        if segment.row < segs[0].row {
            if effect == SegmentEffect::Indefinite && segs[0].value == segment.value {
                segs[0].row = segment.row;
            } else {
                segs.insert(0, segment);
            }
            return;
        }

        let index = effective_index_in(segs, segment.row)
            .unwrap_or_else(|| unreachable!("non-empty segments must have an effective index"));
        let on_same_row = segs[index].row == segment.row;
        if effect != SegmentEffect::Indefinite {
            if on_same_row {
                segs[index] = segment;
            } else {
                segs.insert(index + 1, segment);
            }
            return;
        }

        let prev = if on_same_row {
            index.checked_sub(1)
        } else {
            Some(index)
        };
        if let Some(prev) = prev.filter(|&prev| segs[prev].value == segment.value) {
            if on_same_row {
                segs.remove(index);
                // The removed one was between two segments, which may be equal now.
                if segs
                    .get(index)
                    .is_some_and(|next| next.value == segs[prev].value)
                {
                    segs.remove(index);
                }
            }
            return;
        }
        let next = index + 1;
        if let Some(next_segment) = segs
            .get_mut(next)
            .filter(|next_segment| next_segment.value == segment.value)
        {
            next_segment.row = segment.row;
            if on_same_row {
                segs.remove(index);
            }
            return;
        }
        if on_same_row {
            segs[index] = segment;
        } else {
            segs.insert(next, segment);
        }
    }

    /// Returns the global offset in seconds.
    #[must_use]
    pub const fn global_offset(&self) -> f64 {
        self.global_offset
    }

    /// Sets the global offset in seconds.
    pub fn set_global_offset(&mut self, seconds: f64) {
        self.global_offset = seconds;
    }

    /// Shifts the global offset by `delta` seconds. This is the only change allowed on a loaded song.
    pub fn adjust_global_offset(&mut self, delta: f64) {
        self.global_offset += delta;
    }

    /// Returns the tempo in effect at `row`, or [`DEFAULT_TEMPO`] if there is no tempo segment.
    #[must_use]
    pub fn tempo_at_row(&self, row: Row) -> f64 {
        match self.segment_at(SegmentKind::Tempo, row) {
            Some(TimingSegment {
                value: SegmentValue::Tempo { bpm },
                ..
            }) => *bpm,
            _ => DEFAULT_TEMPO,
        }
    }

    /// Returns the minimum and maximum tempo of the song.
    #[must_use]
    pub fn tempo_range(&self) -> Option<(f64, f64)> {
        self.segments(SegmentKind::Tempo)
            .iter()
            .filter_map(|segment| match segment.value {
                SegmentValue::Tempo { bpm } => Some(bpm),
                _ => None,
            })
            .minmax_by(f64::total_cmp)
            .into_option()
    }

    /// Returns the time signature `(numerator, denominator)` in effect at `row`, 4/4 if there is none.
    #[must_use]
    pub fn time_signature_at_row(&self, row: Row) -> (u32, u32) {
        match self.segment_at(SegmentKind::TimeSignature, row) {
            Some(TimingSegment {
                value:
                    SegmentValue::TimeSignature {
                        numerator,
                        denominator,
                    },
                ..
            }) => (*numerator, *denominator),
            _ => (4, 4),
        }
    }

    fn is_in_range(&self, kind: SegmentKind, row: Row) -> bool {
        self.segments(kind)
            .iter()
            .take_while(|segment| segment.row <= row)
            .filter_map(TimingSegment::range_end)
            .any(|end| row < end)
    }

    /// Whether `row` is crossed with no elapsed time.
    #[must_use]
    pub fn is_row_skipped(&self, row: Row) -> bool {
        self.is_in_range(SegmentKind::Skip, row)
    }

    /// Whether notes on `row` are not judged.
    #[must_use]
    pub fn is_row_fake(&self, row: Row) -> bool {
        self.is_in_range(SegmentKind::Fake, row) || self.is_row_skipped(row)
    }

    fn first_tempo(&self) -> f64 {
        match self.segments(SegmentKind::Tempo).first() {
            Some(TimingSegment {
                value: SegmentValue::Tempo { bpm },
                ..
            }) => *bpm,
            _ => DEFAULT_TEMPO,
        }
    }

    fn timeline_events(&self) -> impl Iterator<Item = (Row, TimelineEvent)> + '_ {
        [
            SegmentKind::Tempo,
            SegmentKind::Skip,
            SegmentKind::Delay,
            SegmentKind::Pause,
        ]
        .into_iter()
        .map(|kind| {
            self.segments(kind).iter().filter_map(|segment| {
                let event = match segment.value {
                    SegmentValue::Tempo { bpm } => TimelineEvent::Tempo(bpm),
                    SegmentValue::Skip { length } => TimelineEvent::Skip(length),
                    SegmentValue::Delay { seconds } => TimelineEvent::Delay(seconds),
                    SegmentValue::Pause { seconds } => TimelineEvent::Pause(seconds),
                    _ => return None,
                };
                Some((segment.row, event))
            })
        })
        .kmerge_by(|(a_row, a), (b_row, b)| (a_row, a.order()) < (b_row, b.order()))
    }

    /// Elapsed seconds from row 0 to the fractional row `target`, without the global offset.
    fn seconds_until(&self, target: f64, at_target: AtTarget) -> f64 {
        let mut bpm = self.first_tempo();
        if target < 0.0 {
            return seconds_between(target, 0.0, bpm, f64::NEG_INFINITY) * -1.0;
        }
        let mut row = 0.0;
        let mut seconds = 0.0;
        let mut skip_end = f64::NEG_INFINITY;
        for (event_row, event) in self.timeline_events() {
            let event_row = event_row.0 as f64;
            if event_row > target {
                break;
            }
            seconds += seconds_between(row, event_row, bpm, skip_end);
            row = f64::max(row, event_row);
            let counted = 0.0 <= event_row && skip_end <= event_row;
            let before_target = event_row < target;
            match event {
                TimelineEvent::Tempo(new_bpm) => bpm = new_bpm,
                TimelineEvent::Skip(length) => {
                    skip_end = skip_end.max(event_row + length.0 as f64);
                }
                TimelineEvent::Delay(delay) => {
                    if counted && (before_target || AtTarget::Note <= at_target) {
                        seconds += delay;
                    }
                }
                TimelineEvent::Pause(pause) => {
                    if counted && (before_target || at_target == AtTarget::Departure) {
                        seconds += pause;
                    }
                }
            }
        }
        seconds + seconds_between(row, target, bpm, skip_end)
    }

    /// Fractional row reached after `target` seconds from row 0, without the global offset.
    fn rows_after(&self, target: f64) -> f64 {
        let rows_in = |seconds: f64, bpm: f64| seconds * bpm / 60.0 * ROWS_PER_BEAT as f64;
        let mut bpm = self.first_tempo();
        if target < 0.0 {
            return rows_in(target, bpm);
        }
        let mut row: f64 = 0.0;
        let mut seconds = 0.0;
        let mut skip_end = f64::NEG_INFINITY;
        for (event_row, event) in self.timeline_events() {
            let event_row = event_row.0 as f64;
            if event_row >= 0.0 {
                let span = seconds_between(row, event_row, bpm, skip_end);
                if target < seconds + span {
                    return row.max(skip_end) + rows_in(target - seconds, bpm);
                }
                seconds += span;
                row = row.max(event_row);
            }
            let counted = 0.0 <= event_row && skip_end <= event_row;
            match event {
                TimelineEvent::Tempo(new_bpm) => bpm = new_bpm,
                TimelineEvent::Skip(length) => {
                    skip_end = skip_end.max(event_row + length.0 as f64);
                }
                TimelineEvent::Delay(frozen) | TimelineEvent::Pause(frozen) => {
                    if counted {
                        if target < seconds + frozen {
                            return event_row;
                        }
                        seconds += frozen;
                    }
                }
            }
        }
        row.max(skip_end) + rows_in(target - seconds, bpm)
    }

    /// Returns the elapsed seconds at `beat`, which is when a note on the beat is to be hit.
    ///
    /// Pauses on the beat are not passed yet but delays are. Rows in a skip take no time, so every row in a skip has
    /// the elapsed time of the skip start.
    #[must_use]
    pub fn elapsed_seconds_at_beat(&self, beat: f64) -> f64 {
        self.seconds_until(beat * ROWS_PER_BEAT as f64, AtTarget::Note) - self.global_offset
    }

    /// Returns the elapsed seconds at `row`. See [`TimingData::elapsed_seconds_at_beat`].
    #[must_use]
    pub fn elapsed_seconds_at_row(&self, row: Row) -> f64 {
        self.seconds_until(row.0 as f64, AtTarget::Note) - self.global_offset
    }

    /// Returns the elapsed seconds when `row` is reached and when it is left. They differ by the pauses and delays
    /// on the row, while the beat stays at the row.
    #[must_use]
    pub fn elapsed_seconds_span_at_row(&self, row: Row) -> (f64, f64) {
        let target = row.0 as f64;
        (
            self.seconds_until(target, AtTarget::Arrival) - self.global_offset,
            self.seconds_until(target, AtTarget::Departure) - self.global_offset,
        )
    }

    /// Returns the beat at the elapsed seconds. The beat stands still during pauses and delays, and jumps over the
    /// skips, so it is monotonic.
    #[must_use]
    pub fn beat_at_elapsed_seconds(&self, seconds: f64) -> f64 {
        self.rows_after(seconds + self.global_offset) / ROWS_PER_BEAT as f64
    }

    /// Returns the row reached at the elapsed seconds, truncating the fraction.
    #[must_use]
    pub fn row_at_elapsed_seconds(&self, seconds: f64) -> Row {
        Row::from_beat_truncated(self.beat_at_elapsed_seconds(seconds))
    }
}
