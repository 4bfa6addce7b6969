//! Parsing [`Song`] from the records.
//!
//! Raw [String] == [`crate::sm::lex`] ==> [`TokenWithRange`] list == [parse] ==> [`Song`] (in [`ParseOutput`])
//!
//! Records other than `#NOTES` go to [`tag_processor`], which fills the song descriptor and collects the raw timing
//! lists. After all the records are read, the timing lists are resolved into [`crate::sm::timing::TimingData`] and
//! each `#NOTES` record is decoded by [`note_data`].

pub mod note_data;
pub mod tag_processor;

use std::{cell::RefCell, rc::Rc};

use thiserror::Error;

use self::{
    note_data::{NoteDataOutput, infer_lane_count, parse_note_data},
    tag_processor::{ParseState, TagDispatcher, preset},
};
use crate::sm::{
    command::{
        Row,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
    },
    lex::token::{Token, TokenWithRange},
    model::{Chart, Difficulty, Song, StepsType},
};

/// Tag names of the chart records, which are not dispatched to the processors.
pub const NOTES_TAGS: [&str; 2] = ["NOTES", "NOTES2"];

/// The number of parameters a `#NOTES` record needs, including the tag name.
pub const NOTES_FIELDS: usize = 7;

/// A recoverable anomaly found on parsing. The offending entry or note is dropped.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseWarning {
    /// A tempo change to zero, which would never proceed.
    #[error("zero tempo is ignored: {entry}")]
    ZeroTempo {
        /// The list entry.
        entry: String,
    },
    /// A pause of zero seconds.
    #[error("zero pause is ignored: {entry}")]
    ZeroPause {
        /// The list entry.
        entry: String,
    },
    /// A number out of the allowed range.
    #[error("invalid value for #{tag}: {value}")]
    InvalidValue {
        /// The tag name.
        tag: String,
        /// The value as written.
        value: String,
    },
    /// A time signature with zero or negative numerator or denominator.
    #[error("time signature must be at least 1/1: {entry}")]
    InvalidTimeSignature {
        /// The list entry.
        entry: String,
    },
    /// A list entry not in the form of `row=value`.
    #[error("expected `row=value` in #{tag} but found: {entry}")]
    MalformedRowValue {
        /// The tag name.
        tag: String,
        /// The list entry.
        entry: String,
    },
    /// A field expected to be a number.
    #[error("expected a number for #{tag} but found: {value}")]
    NonNumericField {
        /// The tag name.
        tag: String,
        /// The value as written.
        value: String,
    },
    /// A hold tail with no open head on the lane.
    #[error("hold tail without head at lane {lane}, {row}")]
    UnmatchedHoldTail {
        /// The lane of the tail.
        lane: usize,
        /// The row of the tail.
        row: Row,
    },
    /// A hold head whose tail never came, which is removed.
    #[error("hold head without tail is removed at lane {lane}, {row}")]
    UnterminatedHold {
        /// The lane of the head.
        lane: usize,
        /// The row of the head.
        row: Row,
    },
    /// The steps type is unknown, so the number of lanes was taken from the note data.
    #[error("unknown steps type {steps_type}, assumed {lanes} lanes")]
    LaneCountInferred {
        /// The steps type as written.
        steps_type: String,
        /// The assumed number of lanes.
        lanes: usize,
    },
    /// A keyword not in the allowed set.
    #[error("unknown value for #{tag}: {value}")]
    UnknownValue {
        /// The tag name.
        tag: String,
        /// The value as written.
        value: String,
    },
}

/// Required chart data is missing or contradicting.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MalformedChart {
    /// A `#NOTES` record has too few fields.
    #[error("#NOTES needs {} fields including the tag but found {found}", NOTES_FIELDS)]
    MissingNotesFields {
        /// The number of fields found.
        found: usize,
    },
    /// The song has no `#NOTES` record.
    #[error("no #NOTES record is found")]
    NoCharts,
    /// A hold tail may close more than one open head on the lane.
    #[error("hold tail at lane {lane}, {row} has more than one open head")]
    AmbiguousHoldTail {
        /// The lane of the tail.
        lane: usize,
        /// The row of the tail.
        row: Row,
    },
}

/// An error which aborts the load.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseError {
    /// The chart data is unusable.
    #[error("malformed chart: {0}")]
    MalformedChart(#[from] MalformedChart),
}

/// A parse warning with position information.
pub type ParseWarningWithRange = SourceRangeMixin<ParseWarning>;

/// A parse error with position information.
pub type ParseErrorWithRange = SourceRangeMixin<ParseError>;

/// Song Parse Output
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ParseOutput {
    /// The output song, or the error aborted the load.
    pub song: Result<Song, ParseErrorWithRange>,
    /// Warnings that occurred during parsing.
    pub parse_warnings: Vec<ParseWarningWithRange>,
}

impl Song {
    /// Parses the records into [`Song`].
    ///
    /// Records are processed in order, but the timing lists are resolved only after all of them are read, so
    /// `#ROWSPERBEAT` affects the lists before it too.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a TokenWithRange<'a>>) -> ParseOutput {
        let state = Rc::new(RefCell::new(ParseState::default()));
        let dispatcher = TagDispatcher::new(preset(&state));
        let mut parse_warnings = vec![];
        let mut chart_tokens = vec![];
        let mut source_end = 0;
        for token in tokens {
            source_end = token.end();
            let Some(tag) = token.content().tag() else {
                continue;
            };
            if NOTES_TAGS.contains(&tag.as_str()) {
                chart_tokens.push(token);
                continue;
            }
            parse_warnings.extend(
                dispatcher
                    .dispatch(&tag, token.content())
                    .into_iter()
                    .map(|warning| warning.into_wrapper(token)),
            );
        }
        drop(dispatcher);
        let mut song = state.take().into_song();

        for token in chart_tokens {
            match parse_chart(token.content()) {
                Ok((chart, warnings)) => {
                    parse_warnings.extend(
                        warnings
                            .into_iter()
                            .map(|warning| warning.into_wrapper(token)),
                    );
                    song.charts.push(chart);
                }
                Err(err) => {
                    return ParseOutput {
                        song: Err(ParseError::from(err).into_wrapper(token)),
                        parse_warnings,
                    };
                }
            }
        }
        if song.charts.is_empty() {
            return ParseOutput {
                song: Err(ParseError::from(MalformedChart::NoCharts).into_wrapper_range(0..source_end)),
                parse_warnings,
            };
        }
        ParseOutput {
            song: Ok(song),
            parse_warnings,
        }
    }
}

/// Decodes a `#NOTES:stepsType:description:difficulty:meter:radarValues:noteData;` record.
fn parse_chart(token: &Token<'_>) -> Result<(Chart, Vec<ParseWarning>), MalformedChart> {
    if token.len() < NOTES_FIELDS {
        return Err(MalformedChart::MissingNotesFields { found: token.len() });
    }
    let mut warnings = vec![];
    let Ok(steps_type) = token.param(1).parse::<StepsType>();
    let description = token.param(2).to_owned();
    let difficulty = Difficulty::from_chart_fields(token.param(3), &description);
    let meter = match token.param(4) {
        "" => 1,
        text => text.parse::<u32>().map_or_else(
            |_| {
                warnings.push(ParseWarning::NonNumericField {
                    tag: "NOTES".to_owned(),
                    value: text.to_owned(),
                });
                1
            },
            |meter| meter.max(1),
        ),
    };
    let data = token.param(6);
    let lanes = steps_type.lane_count().unwrap_or_else(|| {
        let lanes = infer_lane_count(data);
        warnings.push(ParseWarning::LaneCountInferred {
            steps_type: steps_type.to_string(),
            lanes,
        });
        lanes
    });

    let NoteDataOutput {
        mut notes,
        warnings: note_warnings,
    } = parse_note_data(data, lanes)?;
    warnings.extend(note_warnings.into_iter().map(ParseWarning::from));
    if steps_type.is_couple() {
        notes.assign_owners(lanes / 2);
    }
    log::debug!(
        "parsed {steps_type} {difficulty} {meter} chart with {} notes",
        notes.len()
    );
    Ok((
        Chart {
            steps_type,
            description,
            difficulty,
            meter,
            notes,
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sm::lex;

    fn parse(source: &str) -> ParseOutput {
        Song::from_tokens(&lex::parse(source, true).tokens)
    }

    fn warnings(output: &ParseOutput) -> Vec<ParseWarning> {
        output
            .parse_warnings
            .iter()
            .map(|warning| warning.content().clone())
            .collect()
    }

    #[test]
    fn notes_need_seven_fields() {
        let output = parse("#NOTES:dance-single:desc:Easy:3:\n1000\n;");
        let err = output.song.unwrap_err();
        assert_eq!(
            err.content(),
            &ParseError::MalformedChart(MalformedChart::MissingNotesFields { found: 6 })
        );
        assert_eq!(err.range(), 0..39);
    }

    #[test]
    fn no_charts() {
        let output = parse("#TITLE:x;");
        assert_eq!(
            output.song.unwrap_err().into_content(),
            ParseError::MalformedChart(MalformedChart::NoCharts)
        );
    }

    #[test]
    fn chart_fields() {
        let output = parse(
            "#NOTES:dance-double:Someone:hard:abc:0.1,0.2:\n10000000\n;\n#NOTES2:pump-single:smaniac:Hard:12::\n00001\n;",
        );
        assert_eq!(
            warnings(&output),
            vec![ParseWarning::NonNumericField {
                tag: "NOTES".to_owned(),
                value: "abc".to_owned(),
            }]
        );
        let song = output.song.unwrap();
        assert_eq!(song.charts.len(), 2);
        assert_eq!(song.charts[0].steps_type, StepsType::DanceDouble);
        assert_eq!(song.charts[0].difficulty, Difficulty::Hard);
        assert_eq!(song.charts[0].meter, 1);
        assert_eq!(song.charts[0].notes.lane_count(), 8);
        assert_eq!(song.charts[1].difficulty, Difficulty::Challenge);
        assert_eq!(song.charts[1].meter, 12);
        assert_eq!(song.charts[1].notes.lane_notes(4).count(), 1);
    }

    #[test]
    fn unknown_steps_type_infers_lanes() {
        let output = parse("#NOTES:techno-single8::Edit:1::\n10000001\n00000000\n;");
        assert_eq!(
            warnings(&output),
            vec![ParseWarning::LaneCountInferred {
                steps_type: "techno-single8".to_owned(),
                lanes: 8,
            }]
        );
        assert_eq!(output.song.unwrap().charts[0].notes.lane_count(), 8);
    }

    #[test]
    fn couple_lanes_have_owners() {
        let song = parse("#NOTES:dance-couple::Easy:1::\n10000001\n;").song.unwrap();
        let notes = &song.charts[0].notes;
        assert_eq!(notes.note_at(0, Row(0)).owner, Some(0));
        assert_eq!(notes.note_at(7, Row(0)).owner, Some(1));
    }
}
