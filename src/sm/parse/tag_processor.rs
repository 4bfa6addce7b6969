//! Processors of the records by tag name, and the dispatcher routing the records to them.
//!
//! Each processor owns a share of the [`ParseState`] and takes control of a few tags. Timing lists are kept with
//! unresolved positions in the state until [`ParseState::into_song`] is called.

mod metadata;
mod timing;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use itertools::Itertools;

use super::ParseWarning;
use crate::sm::{
    command::{ROWS_PER_BEAT, Row, value::RowPosition},
    lex::token::Token,
    model::Song,
    timing::{SegmentValue, TimingData, TimingSegment, build_tempo_timeline},
};

pub use self::{metadata::MetadataProcessor, timing::TimingProcessor};

/// A processor of records in the simfile. An implementation takes control of only a few tags, such as the tempo
/// lists or the descriptive texts.
pub trait TagProcessor {
    /// Tag names in uppercase this processor handles.
    fn tags(&self) -> &'static [&'static str];
    /// Processes a record whose tag name is one of [`TagProcessor::tags`], returning the warnings found.
    fn on_tag(&self, tag: &str, token: &Token<'_>) -> Vec<ParseWarning>;
}

/// The song being parsed, and the timing lists not resolved into rows yet.
#[derive(Debug, Default)]
pub struct ParseState {
    /// The song with its descriptive fields. The timing data and the charts are filled later.
    pub song: Song,
    /// `#OFFSET`
    pub offset: f64,
    /// `#ROWSPERBEAT`, the resolution of positions written in sub-rows.
    pub rows_per_beat: Option<i64>,
    /// `#BPMS` entries.
    pub tempos: Vec<(RowPosition, f64)>,
    /// `#STOPS` entries.
    pub pauses: Vec<(RowPosition, f64)>,
    /// Entries of the other segment lists.
    pub segments: Vec<(RowPosition, SegmentValue)>,
}

impl ParseState {
    /// Resolves the timing lists and builds the timing data of the song.
    #[must_use]
    pub fn into_song(self) -> Song {
        let rows_per_beat = self.rows_per_beat.unwrap_or(ROWS_PER_BEAT);
        let resolve = |list: Vec<(RowPosition, f64)>| {
            list.into_iter()
                .map(|(position, value)| (position.resolve(rows_per_beat), value))
                .collect_vec()
        };
        let timeline = build_tempo_timeline(&resolve(self.tempos), &resolve(self.pauses));

        let mut timing = TimingData::new();
        timing.set_global_offset(self.offset);
        timing.adjust_global_offset(timeline.offset_adjustment);
        timing.insert(TimingSegment::new(
            Row::ZERO,
            SegmentValue::TimeSignature {
                numerator: 4,
                denominator: 4,
            },
        ));
        for segment in timeline.segments {
            timing.insert(segment);
        }
        let mut segments = self
            .segments
            .into_iter()
            .map(|(position, value)| TimingSegment::new(position.resolve(rows_per_beat), value))
            .collect_vec();
        segments.sort_by_key(|segment| segment.row);
        for segment in segments {
            timing.insert(segment);
        }

        Song {
            timing,
            ..self.song
        }
    }
}

/// Routes the records to the processors by tag name.
pub struct TagDispatcher {
    processors: Vec<Box<dyn TagProcessor>>,
    table: HashMap<&'static str, usize>,
}

impl TagDispatcher {
    /// Creates a dispatcher. A tag claimed by more than one processor goes to the last one.
    #[must_use]
    pub fn new(processors: Vec<Box<dyn TagProcessor>>) -> Self {
        let table = processors
            .iter()
            .enumerate()
            .flat_map(|(index, processor)| processor.tags().iter().map(move |&tag| (tag, index)))
            .collect();
        Self { processors, table }
    }

    /// Processes a record with the tag name in uppercase. Unknown tags are ignored.
    pub fn dispatch(&self, tag: &str, token: &Token<'_>) -> Vec<ParseWarning> {
        let Some(processor) = self.table.get(tag).and_then(|&index| self.processors.get(index)) else {
            log::trace!("ignored unknown tag #{tag}");
            return vec![];
        };
        processor.on_tag(tag, token)
    }
}

/// Returns the processors of all the supported tags, sharing the state.
#[must_use]
pub fn preset(state: &Rc<RefCell<ParseState>>) -> Vec<Box<dyn TagProcessor>> {
    vec![
        Box::new(MetadataProcessor(Rc::clone(state))),
        Box::new(TimingProcessor(Rc::clone(state))),
    ]
}
