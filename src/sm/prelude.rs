//! Prelude module for the simfile parser.
//!
//! You can use `use simfile_rs::sm::prelude::*;` to import the commonly used types at once.

#[cfg(feature = "diagnostics")]
pub use super::diagnostics::{SimpleSource, ToAriadne, emit_sm_warnings};
pub use super::{
    ParseConfig, SmOutput, SmWarning,
    command::{
        BEATS_PER_MEASURE, ROWS_PER_BEAT, Row,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
        time::parse_clock_time,
        value::RowPosition,
    },
    default_config,
    lex::{
        LexOutput,
        token::{Token, TokenWithRange},
    },
    model::{
        Chart, Difficulty, DisplayBpm, HoldKind, NoteEvent, NoteGrid, NoteKind, Selectable, Song,
        SongMetadata, StepsType,
    },
    parse::{
        MalformedChart, ParseError, ParseErrorWithRange, ParseOutput, ParseWarning,
        ParseWarningWithRange,
        note_data::{NoteDataOutput, NoteDataWarning, parse_note_data},
        tag_processor::{TagDispatcher, TagProcessor},
    },
    parse_sm,
    timing::{
        DEFAULT_TEMPO, INSTANT_TEMPO, SegmentEffect, SegmentKind, SegmentValue, SpeedUnit,
        TempoTimeline, TimingData, TimingSegment, build_tempo_timeline,
    },
};
