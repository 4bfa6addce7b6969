use std::{cell::RefCell, rc::Rc};

use super::{ParseState, TagProcessor};
use crate::sm::{
    command::{time::parse_clock_time, value::parse_f64},
    lex::token::Token,
    model::{DisplayBpm, Selectable},
    parse::ParseWarning,
};

const TAGS: [&str; 17] = [
    "TITLE",
    "SUBTITLE",
    "ARTIST",
    "TITLETRANSLIT",
    "SUBTITLETRANSLIT",
    "ARTISTTRANSLIT",
    "GENRE",
    "CREDIT",
    "BANNER",
    "BACKGROUND",
    "LYRICSPATH",
    "CDTITLE",
    "MUSIC",
    "SAMPLESTART",
    "SAMPLELENGTH",
    "DISPLAYBPM",
    "SELECTABLE",
];

/// It processes the descriptive texts, `#SAMPLESTART`, `#SAMPLELENGTH`, `#DISPLAYBPM` and `#SELECTABLE`.
pub struct MetadataProcessor(pub Rc<RefCell<ParseState>>);

impl TagProcessor for MetadataProcessor {
    fn tags(&self) -> &'static [&'static str] {
        &TAGS
    }

    fn on_tag(&self, tag: &str, token: &Token<'_>) -> Vec<ParseWarning> {
        let mut state = self.0.borrow_mut();
        let song = &mut state.song;
        // Texts may contain colons, which split the parameters.
        let args = token.joined_args();
        if let Some(field) = song.metadata.field_mut(tag) {
            *field = args;
            return vec![];
        }
        let result = match tag {
            "SAMPLESTART" => parse_sample_time(tag, &args).map(|seconds| {
                if let Some(seconds) = seconds {
                    song.sample_start = seconds;
                }
            }),
            "SAMPLELENGTH" => parse_sample_time(tag, &args).map(|seconds| {
                if let Some(seconds) = seconds {
                    song.sample_length = seconds;
                }
            }),
            "DISPLAYBPM" => parse_display_bpm(token).map(|display_bpm| {
                song.display_bpm = display_bpm;
            }),
            "SELECTABLE" => match args.trim() {
                "" => Ok(()),
                value => Selectable::lookup(value)
                    .map(|selectable| song.selectable = selectable)
                    .ok_or_else(|| ParseWarning::UnknownValue {
                        tag: tag.to_owned(),
                        value: value.to_owned(),
                    }),
            },
            _ => Ok(()),
        };
        result.err().into_iter().collect()
    }
}

fn parse_sample_time(tag: &str, args: &str) -> Result<Option<f64>, ParseWarning> {
    if args.trim().is_empty() {
        return Ok(None);
    }
    parse_clock_time(args)
        .map(Some)
        .ok_or_else(|| ParseWarning::NonNumericField {
            tag: tag.to_owned(),
            value: args.to_owned(),
        })
}

fn parse_display_bpm(token: &Token<'_>) -> Result<DisplayBpm, ParseWarning> {
    let non_numeric = |value: &str| ParseWarning::NonNumericField {
        tag: "DISPLAYBPM".to_owned(),
        value: value.to_owned(),
    };
    let min = token.param(1);
    let max = token.param(2);
    match (min, max) {
        ("", "") => Ok(DisplayBpm::Actual),
        ("*", _) => Ok(DisplayBpm::Random),
        (min, max) => {
            let min_value = parse_f64(min).ok_or_else(|| non_numeric(min))?;
            let max_value = if max.is_empty() {
                min_value
            } else {
                parse_f64(max).ok_or_else(|| non_numeric(max))?
            };
            Ok(DisplayBpm::Specified {
                min: min_value.min(max_value),
                max: min_value.max(max_value),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sm::{lex, model::SongMetadata};

    fn process(source: &str) -> (ParseState, Vec<ParseWarning>) {
        let state = Rc::new(RefCell::new(ParseState::default()));
        let processor = MetadataProcessor(Rc::clone(&state));
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
    fn texts_keep_colons() {
        let (state, warnings) = process("#TITLE:Re:Start;#ARTIST: someone ;#MUSIC:song.ogg;");
        assert!(warnings.is_empty());
        assert_eq!(
            state.song.metadata,
            SongMetadata {
                title: "Re:Start".to_owned(),
                artist: "someone".to_owned(),
                music: "song.ogg".to_owned(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn sample_times() {
        let (state, warnings) =
            process("#SAMPLESTART:1:02.5;#SAMPLELENGTH:12;#SAMPLESTART:;");
        assert!(warnings.is_empty());
        assert_eq!(state.song.sample_start, 62.5);
        assert_eq!(state.song.sample_length, 12.0);

        let (_, warnings) = process("#SAMPLELENGTH:ten;");
        assert_eq!(
            warnings,
            vec![ParseWarning::NonNumericField {
                tag: "SAMPLELENGTH".to_owned(),
                value: "ten".to_owned(),
            }]
        );
    }

    #[test]
    fn display_bpm() {
        let display_bpm = |source: &str| process(source).0.song.display_bpm;
        assert_eq!(display_bpm("#DISPLAYBPM:*;"), DisplayBpm::Random);
        assert_eq!(display_bpm("#DISPLAYBPM:;"), DisplayBpm::Actual);
        assert_eq!(
            display_bpm("#DISPLAYBPM:150;"),
            DisplayBpm::Specified {
                min: 150.0,
                max: 150.0
            }
        );
        assert_eq!(
            display_bpm("#DISPLAYBPM:200:100;"),
            DisplayBpm::Specified {
                min: 100.0,
                max: 200.0
            }
        );
    }

    #[test]
    fn selectable() {
        let (state, warnings) = process("#SELECTABLE:roulette;");
        assert!(warnings.is_empty());
        assert_eq!(state.song.selectable, Selectable::Roulette);

        let (state, warnings) = process("#SELECTABLE:maybe;");
        assert_eq!(state.song.selectable, Selectable::Yes);
        assert_eq!(warnings.len(), 1);
    }
}
