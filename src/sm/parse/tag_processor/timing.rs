use std::{cell::RefCell, rc::Rc};

use super::{ParseState, TagProcessor};
use crate::sm::{
    command::{
        Row,
        value::{RowEntry, RowPosition, list_entries, parse_f64, parse_row_entry},
    },
    lex::token::Token,
    parse::ParseWarning,
    timing::{SegmentValue, SpeedUnit},
};

const TAGS: [&str; 14] = [
    "OFFSET",
    "ROWSPERBEAT",
    "BPMS",
    "STOPS",
    "FREEZES",
    "DELAYS",
    "TIMESIGNATURES",
    "WARPS",
    "FAKES",
    "LABELS",
    "TICKCOUNTS",
    "COMBOS",
    "SPEEDS",
    "SCROLLS",
];

/// It processes `#OFFSET`, `#ROWSPERBEAT` and the `row=value` lists of timing segments.
pub struct TimingProcessor(pub Rc<RefCell<ParseState>>);

impl TagProcessor for TimingProcessor {
    fn tags(&self) -> &'static [&'static str] {
        &TAGS
    }

    fn on_tag(&self, tag: &str, token: &Token<'_>) -> Vec<ParseWarning> {
        let args = token.joined_args();
        let mut state = self.0.borrow_mut();
        let mut list = ListParser {
            tag,
            warnings: vec![],
        };
        match tag {
            "OFFSET" => {
                if let Some(offset) = list.number(&args) {
                    state.offset = offset;
                }
            }
            "ROWSPERBEAT" => {
                if let Some(rows_per_beat) = list.positive_integer(&args) {
                    state.rows_per_beat = Some(rows_per_beat);
                }
            }
            "BPMS" => {
                for (entry, RowEntry { position, values }) in list.entries(&args, 1, 1) {
                    match parse_f64(values[0]) {
                        Some(0.0) => list.warnings.push(ParseWarning::ZeroTempo {
                            entry: entry.to_owned(),
                        }),
                        Some(bpm) => state.tempos.push((position, bpm)),
                        None => list.malformed(entry),
                    }
                }
            }
            "STOPS" | "FREEZES" => {
                for (entry, RowEntry { position, values }) in list.entries(&args, 1, 1) {
                    match parse_f64(values[0]) {
                        Some(0.0) => list.warnings.push(ParseWarning::ZeroPause {
                            entry: entry.to_owned(),
                        }),
                        Some(seconds) => state.pauses.push((position, seconds)),
                        None => list.malformed(entry),
                    }
                }
            }
            "DELAYS" => {
                for (entry, RowEntry { position, values }) in list.entries(&args, 1, 1) {
                    if let Some(seconds) = list.positive(entry, values[0]) {
                        state
                            .segments
                            .push((position, SegmentValue::Delay { seconds }));
                    }
                }
            }
            "TIMESIGNATURES" => {
                for (entry, RowEntry { position, values }) in list.entries(&args, 2, 2) {
                    let (Ok(numerator), Ok(denominator)) =
                        (values[0].parse::<i64>(), values[1].parse::<i64>())
                    else {
                        list.malformed(entry);
                        continue;
                    };
                    let positive = |value: i64| u32::try_from(value).ok().filter(|&value| 1 <= value);
                    let (Some(numerator), Some(denominator)) = (positive(numerator), positive(denominator))
                    else {
                        list.warnings.push(ParseWarning::InvalidTimeSignature {
                            entry: entry.to_owned(),
                        });
                        continue;
                    };
                    state.segments.push((
                        position,
                        SegmentValue::TimeSignature {
                            numerator,
                            denominator,
                        },
                    ));
                }
            }
            "WARPS" | "FAKES" => {
                for (entry, RowEntry { position, values }) in list.entries(&args, 1, 1) {
                    let Some(beats) = list.positive(entry, values[0]) else {
                        continue;
                    };
                    let length = Row::from_beat(beats);
                    let value = if tag == "WARPS" {
                        SegmentValue::Skip { length }
                    } else {
                        SegmentValue::Fake { length }
                    };
                    state.segments.push((position, value));
                }
            }
            "LABELS" => {
                for (_, RowEntry { position, values }) in list.entries(&args, 1, usize::MAX) {
                    state.segments.push((
                        position,
                        SegmentValue::Label {
                            name: values.join("="),
                        },
                    ));
                }
            }
            "TICKCOUNTS" => {
                for (entry, RowEntry { position, values }) in list.entries(&args, 1, 1) {
                    match values[0].parse() {
                        Ok(ticks) => state
                            .segments
                            .push((position, SegmentValue::TickCount { ticks })),
                        Err(_) => list.malformed(entry),
                    }
                }
            }
            "COMBOS" => {
                for (entry, RowEntry { position, values }) in list.entries(&args, 1, 2) {
                    let hit = values[0].parse::<u32>();
                    let miss = values.get(1).map_or(hit.clone(), |miss| miss.parse());
                    match (hit, miss) {
                        (Ok(hit), Ok(miss)) => state
                            .segments
                            .push((position, SegmentValue::Combo { hit, miss })),
                        _ => list.malformed(entry),
                    }
                }
            }
            "SPEEDS" => {
                for (entry, RowEntry { position, values }) in list.entries(&args, 2, 3) {
                    let (Some(ratio), Some(delay)) = (parse_f64(values[0]), parse_f64(values[1]))
                    else {
                        list.malformed(entry);
                        continue;
                    };
                    if delay < 0.0 {
                        list.invalid(values[1]);
                        continue;
                    }
                    let unit = match values.get(2).copied() {
                        None | Some("0") => SpeedUnit::Beats,
                        Some("1") => SpeedUnit::Seconds,
                        Some(unit) => {
                            list.warnings.push(ParseWarning::UnknownValue {
                                tag: tag.to_owned(),
                                value: unit.to_owned(),
                            });
                            SpeedUnit::Beats
                        }
                    };
                    state
                        .segments
                        .push((position, SegmentValue::Speed { ratio, delay, unit }));
                }
            }
            "SCROLLS" => {
                for (entry, RowEntry { position, values }) in list.entries(&args, 1, 1) {
                    match parse_f64(values[0]) {
                        Some(ratio) => state
                            .segments
                            .push((position, SegmentValue::Scroll { ratio })),
                        None => list.malformed(entry),
                    }
                }
            }
            _ => {}
        }
        list.warnings
    }
}

/// Parses the values of a tag, collecting the warnings.
struct ListParser<'t> {
    tag: &'t str,
    warnings: Vec<ParseWarning>,
}

impl ListParser<'_> {
    /// Splits the list into entries of `row=value...` having between `min_values` and `max_values` values. Malformed
    /// entries are dropped with warnings.
    fn entries<'a>(
        &mut self,
        list: &'a str,
        min_values: usize,
        max_values: usize,
    ) -> Vec<(&'a str, RowEntry<'a>)> {
        list_entries(list)
            .filter_map(|entry| {
                let parsed = parse_row_entry(entry, min_values, max_values);
                if parsed.is_none() {
                    self.malformed(entry);
                }
                parsed.map(|parsed| (entry, parsed))
            })
            .collect()
    }

    fn malformed(&mut self, entry: &str) {
        self.warnings.push(ParseWarning::MalformedRowValue {
            tag: self.tag.to_owned(),
            entry: entry.to_owned(),
        });
    }

    fn invalid(&mut self, value: &str) {
        self.warnings.push(ParseWarning::InvalidValue {
            tag: self.tag.to_owned(),
            value: value.to_owned(),
        });
    }

    /// Parses a positive number of the entry.
    fn positive(&mut self, entry: &str, value: &str) -> Option<f64> {
        let Some(value_parsed) = parse_f64(value) else {
            self.malformed(entry);
            return None;
        };
        if value_parsed <= 0.0 {
            self.invalid(value);
            return None;
        }
        Some(value_parsed)
    }

    /// Parses the whole value as a number. A blank value is silently ignored.
    fn number(&mut self, value: &str) -> Option<f64> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let parsed = parse_f64(value);
        if parsed.is_none() {
            self.warnings.push(ParseWarning::NonNumericField {
                tag: self.tag.to_owned(),
                value: value.to_owned(),
            });
        }
        parsed
    }

    fn positive_integer(&mut self, value: &str) -> Option<i64> {
        let value = value.trim();
        match value.parse::<i64>() {
            Ok(parsed) if 0 < parsed => Some(parsed),
            Ok(_) => {
                self.invalid(value);
                None
            }
            Err(_) => {
                self.warnings.push(ParseWarning::NonNumericField {
                    tag: self.tag.to_owned(),
                    value: value.to_owned(),
                });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sm::lex;

    fn process(source: &str) -> (ParseState, Vec<ParseWarning>) {
        let state = Rc::new(RefCell::new(ParseState::default()));
        let processor = TimingProcessor(Rc::clone(&state));
        let mut warnings = vec![];
        for token in lex::parse(source, true).tokens {
            let token = token.content();
            if let Some(tag) = token.tag() {
                warnings.extend(processor.on_tag(&tag, token));
            }
        }
        drop(processor);
        (state.take(), warnings)
    }

    #[test]
    fn tempo_and_pause_lists() {
        let (state, warnings) =
            process("#BPMS:0.000=120.000,\n4.000=0,r96=240;\n#FREEZES:4=1.5,8=0,x=1;");
        assert_eq!(
            state.tempos,
            vec![
                (RowPosition::Beat(0.0), 120.0),
                (RowPosition::SubRows(96), 240.0),
            ]
        );
        assert_eq!(state.pauses, vec![(RowPosition::Beat(4.0), 1.5)]);
        assert_eq!(
            warnings,
            vec![
                ParseWarning::ZeroTempo {
                    entry: "4.000=0".to_owned(),
                },
                ParseWarning::ZeroPause {
                    entry: "8=0".to_owned(),
                },
                ParseWarning::MalformedRowValue {
                    tag: "FREEZES".to_owned(),
                    entry: "x=1".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn time_signatures() {
        let (state, warnings) = process("#TIMESIGNATURES:0=3=4,4=0=4,8=a=4;");
        assert_eq!(
            state.segments,
            vec![(
                RowPosition::Beat(0.0),
                SegmentValue::TimeSignature {
                    numerator: 3,
                    denominator: 4,
                },
            )]
        );
        assert_eq!(
            warnings,
            vec![
                ParseWarning::InvalidTimeSignature {
                    entry: "4=0=4".to_owned(),
                },
                ParseWarning::MalformedRowValue {
                    tag: "TIMESIGNATURES".to_owned(),
                    entry: "8=a=4".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn other_segment_lists() {
        let (state, warnings) = process(
            "#WARPS:4=2;#DELAYS:1=0.5,2=-1;#LABELS:0=Song Start;#COMBOS:0=2;#SPEEDS:0=1.5=0.5=1;#SCROLLS:2=0.5;#TICKCOUNTS:0=4;",
        );
        assert_eq!(
            state.segments,
            vec![
                (
                    RowPosition::Beat(4.0),
                    SegmentValue::Skip { length: Row(96) }
                ),
                (RowPosition::Beat(1.0), SegmentValue::Delay { seconds: 0.5 }),
                (
                    RowPosition::Beat(0.0),
                    SegmentValue::Label {
                        name: "Song Start".to_owned()
                    }
                ),
                (RowPosition::Beat(0.0), SegmentValue::Combo { hit: 2, miss: 2 }),
                (
                    RowPosition::Beat(0.0),
                    SegmentValue::Speed {
                        ratio: 1.5,
                        delay: 0.5,
                        unit: SpeedUnit::Seconds
                    }
                ),
                (RowPosition::Beat(2.0), SegmentValue::Scroll { ratio: 0.5 }),
                (RowPosition::Beat(0.0), SegmentValue::TickCount { ticks: 4 }),
            ]
        );
        assert_eq!(
            warnings,
            vec![ParseWarning::InvalidValue {
                tag: "DELAYS".to_owned(),
                value: "-1".to_owned(),
            }]
        );
    }

    #[test]
    fn offset_and_resolution() {
        let (state, warnings) = process("#OFFSET:-0.025;#ROWSPERBEAT:24;#OFFSET:;");
        assert!(warnings.is_empty());
        assert_eq!(state.offset, -0.025);
        assert_eq!(state.rows_per_beat, Some(24));

        let (_, warnings) = process("#OFFSET:soon;#ROWSPERBEAT:0;");
        assert_eq!(
            warnings,
            vec![
                ParseWarning::NonNumericField {
                    tag: "OFFSET".to_owned(),
                    value: "soon".to_owned(),
                },
                ParseWarning::InvalidValue {
                    tag: "ROWSPERBEAT".to_owned(),
                    value: "0".to_owned(),
                },
            ]
        );
    }
}
