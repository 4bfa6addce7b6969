//! Decoder of the note data block of `#NOTES`, the grid of lane characters.
//!
//! Measures are separated by `,` and each measure has lines of the same length, one character per lane. The lines
//! of a measure divide it evenly.

use itertools::Itertools;

use super::{MalformedChart, ParseWarning};
use crate::sm::{
    command::{BEATS_PER_MEASURE, ROWS_PER_BEAT, Row},
    model::{HoldKind, NoteEvent, NoteGrid, NoteKind},
};

/// A recoverable anomaly of the note data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteDataWarning {
    /// See [`ParseWarning::UnmatchedHoldTail`].
    UnmatchedHoldTail {
        /// The lane of the tail.
        lane: usize,
        /// The row of the tail.
        row: Row,
    },
    /// See [`ParseWarning::UnterminatedHold`].
    UnterminatedHold {
        /// The lane of the head.
        lane: usize,
        /// The row of the head.
        row: Row,
    },
}

impl From<NoteDataWarning> for ParseWarning {
    fn from(warning: NoteDataWarning) -> Self {
        match warning {
            NoteDataWarning::UnmatchedHoldTail { lane, row } => {
                Self::UnmatchedHoldTail { lane, row }
            }
            NoteDataWarning::UnterminatedHold { lane, row } => Self::UnterminatedHold { lane, row },
        }
    }
}

/// Output of [`parse_note_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct NoteDataOutput {
    /// The decoded notes.
    pub notes: NoteGrid,
    /// Warnings that occurred during decoding.
    pub warnings: Vec<NoteDataWarning>,
}

/// A lane character decoded.
enum Cell {
    Note(NoteEvent),
    HoldHead(HoldKind),
    HoldTail,
}

impl Cell {
    fn from_char(c: char) -> Option<Self> {
        let cell = match c {
            '1' => Self::Note(NoteEvent::new(NoteKind::Tap)),
            '2' => Self::HoldHead(HoldKind::Hold),
            '3' => Self::HoldTail,
            '4' => Self::HoldHead(HoldKind::Roll),
            'M' => Self::Note(NoteEvent::new(NoteKind::Mine)),
            'K' => Self::Note(NoteEvent::new(NoteKind::AutoKeysound)),
            'L' => Self::Note(NoteEvent::new(NoteKind::Lift)),
            'F' => Self::Note(NoteEvent::new(NoteKind::Fake)),
            _ => return None,
        };
        Some(cell)
    }
}

/// Removes `//` comments to the end of each line, keeping the text before them as is.
fn strip_comments(block: &str) -> String {
    block
        .split('\n')
        .map(|line| line.find("//").map_or(line, |comment| &line[..comment]))
        .join("\n")
}

/// Splits the block into measures of non-blank lines. Blank measures are dropped, so they take no place.
fn measures(block: &str) -> impl Iterator<Item = Vec<&str>> {
    block
        .split(',')
        .map(|measure| {
            measure
                .lines()
                .map(str::trim_start)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|lines| !lines.is_empty())
}

/// Guesses the number of lanes of the note data from its longest line.
#[must_use]
pub fn infer_lane_count(block: &str) -> usize {
    let block = strip_comments(block);
    measures(&block)
        .flatten()
        .map(|line| line.trim_end().chars().count())
        .max()
        .unwrap_or(0)
}

/// Decodes the note data block into a grid of `lane_count` lanes.
///
/// Characters beyond `lane_count` are ignored. A hold head waits for a tail `3` on its lane, and one never closed is
/// removed with a warning. It is an error that a tail may close more than one open head.
pub fn parse_note_data(block: &str, lane_count: usize) -> Result<NoteDataOutput, MalformedChart> {
    let block = strip_comments(block);
    let mut notes = NoteGrid::new(lane_count);
    let mut warnings = vec![];
    let mut open_heads: Vec<Vec<Row>> = vec![vec![]; lane_count];

    for (measure_index, lines) in measures(&block).enumerate() {
        let line_count = lines.len() as i64;
        for (line_index, line) in lines.into_iter().enumerate() {
            let row = Row::from_sub_rows(
                (measure_index as i64 * line_count + line_index as i64)
                    * BEATS_PER_MEASURE
                    * ROWS_PER_BEAT,
                line_count * ROWS_PER_BEAT,
            );
            for (lane, c) in line.chars().take(lane_count).enumerate() {
                let Some(cell) = Cell::from_char(c) else {
                    continue;
                };
                let open = &mut open_heads[lane];
                match cell {
                    Cell::Note(note) => {
                        open.retain(|&head| head != row);
                        notes.set_note(lane, row, note);
                    }
                    Cell::HoldHead(hold) => {
                        open.retain(|&head| head != row);
                        open.push(row);
                        notes.set_note(
                            lane,
                            row,
                            NoteEvent::hold_head(hold, NoteEvent::OPEN_DURATION),
                        );
                    }
                    Cell::HoldTail => match open.as_slice() {
                        [] => warnings.push(NoteDataWarning::UnmatchedHoldTail { lane, row }),
                        [head] => {
                            let head = *head;
                            open.clear();
                            let mut note = notes.note_at(lane, head);
                            note.duration = row - head;
                            notes.set_note(lane, head, note);
                        }
                        _ => return Err(MalformedChart::AmbiguousHoldTail { lane, row }),
                    },
                }
            }
        }
    }

    for (lane, heads) in open_heads.into_iter().enumerate() {
        for row in heads {
            log::warn!("removed hold head without tail at lane {lane}, {row}");
            notes.set_note(lane, row, NoteEvent::EMPTY);
            warnings.push(NoteDataWarning::UnterminatedHold { lane, row });
        }
    }
    Ok(NoteDataOutput { notes, warnings })
}
