use pretty_assertions::assert_eq;
use simfile_rs::sm::prelude::*;

use super::{assert_seconds, parse_clean};

#[test]
fn bright_lights() {
    let song = parse_clean(include_str!("files/bright_lights.sm"));

    assert_eq!(song.metadata.title, "Bright Lights");
    assert_eq!(song.metadata.subtitle, "(Extended Mix)");
    assert_eq!(song.metadata.artist, "Test Unit");
    assert_eq!(song.metadata.music, "bright.ogg");
    assert_eq!(song.sample_start, 32.0);
    assert_eq!(song.sample_length, 12.0);
    assert_eq!(song.selectable, Selectable::Yes);
    assert_eq!(song.display_bpm_range(), Some((150.0, 300.0)));
    assert_eq!(song.timing.global_offset(), -0.05);

    assert_eq!(
        song.timing.segments(SegmentKind::Tempo),
        &[
            TimingSegment::tempo(Row(0), 150.0),
            TimingSegment::tempo(Row(768), 300.0),
            TimingSegment::tempo(Row(1152), 150.0),
        ]
    );
    assert_eq!(
        song.timing.segments(SegmentKind::Pause),
        &[
            TimingSegment::pause(Row(384), 0.4),
            TimingSegment::pause(Row(960), 0.2),
        ]
    );

    assert_eq!(song.charts.len(), 2);
    let easy = &song.charts[0];
    assert_eq!(easy.steps_type, StepsType::DanceSingle);
    assert_eq!(easy.description, "Ray");
    assert_eq!(easy.difficulty, Difficulty::Easy);
    assert_eq!(easy.meter, 3);
    assert_eq!(easy.notes.len(), 9);
    assert_eq!(
        easy.notes.note_at(0, Row(192)),
        NoteEvent::hold_head(HoldKind::Hold, Row(96))
    );
    assert_eq!(easy.notes.note_at(3, Row(384)).kind, NoteKind::Tap);
    assert_eq!(easy.notes.note_at(1, Row(432)).kind, NoteKind::Tap);

    let hard = song
        .chart(&StepsType::DanceSingle, Difficulty::Hard)
        .expect("hard chart exists");
    assert_eq!(hard.meter, 8);
    assert_eq!(hard.notes.len(), 14);
    assert_eq!(hard.notes.count_kind(NoteKind::HoldHead), 2);
    assert_eq!(hard.notes.count_kind(NoteKind::Mine), 2);
    assert_eq!(hard.notes.count_kind(NoteKind::Lift), 1);
    assert_eq!(
        hard.notes.note_at(0, Row(192)),
        NoteEvent::hold_head(HoldKind::Roll, Row(144))
    );
    assert_eq!(hard.notes.last_row(), Some(Row(576)));
}

#[test]
fn bright_lights_times() {
    let song = parse_clean(include_str!("files/bright_lights.sm"));
    let timing = &song.timing;

    // 8 beats at 150 BPM, and the offset
    assert_seconds(timing.elapsed_seconds_at_row(Row(384)), 3.25);
    let (arrival, departure) = timing.elapsed_seconds_span_at_row(Row(384));
    assert_seconds(arrival, 3.25);
    assert_seconds(departure, 3.65);
    assert_seconds(timing.elapsed_seconds_at_row(Row(768)), 6.85);
    assert_seconds(timing.elapsed_seconds_at_row(Row(1152)), 8.65);
    assert_eq!(timing.tempo_at_row(Row(800)), 300.0);

    // The beat stands still during the pause.
    assert_eq!(timing.row_at_elapsed_seconds(3.45), Row(384));
    assert_seconds(timing.beat_at_elapsed_seconds(3.85), 8.5);
}

#[test]
fn warp_zone() {
    let song = parse_clean(include_str!("files/warp_zone.sm"));
    let timing = &song.timing;

    assert_eq!(song.metadata.title, "Warp Zone");
    assert_eq!(song.charts[0].notes.len(), 16);
    // A pause before beat 0 moves the song later.
    assert_eq!(timing.global_offset(), -0.25);
    assert_eq!(
        timing.segments(SegmentKind::Tempo),
        &[TimingSegment::tempo(Row(0), 120.0)]
    );
    assert_eq!(
        timing.segments(SegmentKind::Skip),
        &[
            TimingSegment::skip(Row(192), Row(192)),
            TimingSegment::skip(Row(480), Row(48)),
            TimingSegment::skip(Row(576), Row(96)),
        ]
    );
    assert_eq!(timing.time_signature_at_row(Row(0)), (4, 4));
    assert_eq!(timing.time_signature_at_row(Row(400)), (3, 4));

    assert!(timing.is_row_skipped(Row(300)));
    assert!(!timing.is_row_skipped(Row(400)));
    assert!(timing.is_row_fake(Row(600)));
    assert!(!timing.is_row_fake(Row(672)));

    // The delay on beat 2 passes before its note.
    assert_seconds(timing.elapsed_seconds_at_row(Row(96)), 1.35);
    assert_seconds(timing.elapsed_seconds_at_row(Row(192)), 2.35);
    assert_seconds(timing.elapsed_seconds_at_row(Row(300)), 2.35);
    assert_seconds(timing.elapsed_seconds_at_row(Row(384)), 2.35);
    assert_seconds(timing.elapsed_seconds_at_row(Row(480)), 3.35);
    assert_seconds(timing.elapsed_seconds_at_row(Row(768)), 4.85);
    assert_seconds(timing.beat_at_elapsed_seconds(3.1), 9.5);
}

#[test]
fn malformed_chart_is_error() {
    let source = "#TITLE:broken;\n#NOTES:dance-single:only:three;";
    let SmOutput { song, .. } = parse_sm(source, default_config());
    let err = song.unwrap_err();
    assert_eq!(
        err.content(),
        &ParseError::MalformedChart(MalformedChart::MissingNotesFields { found: 4 })
    );
    assert_eq!(err.range(), 15..46);
}

#[test]
fn anomalies_are_warnings() {
    let source = "#BPMS:0=120,4=0,8=abc;\n#STOPS:4=0;\n#TIMESIGNATURES:0=0=4;\n#NOTES:dance-single::Medium:5::\n1000\n0003\n0002\n;";
    let SmOutput { song, warnings } = parse_sm(source, default_config());
    let warnings: Vec<ParseWarning> = warnings
        .into_iter()
        .filter_map(|warning| match warning {
            SmWarning::ParseWarning(warning) => Some(warning.into_content()),
            _ => None,
        })
        .collect();
    assert_eq!(
        warnings,
        vec![
            ParseWarning::ZeroTempo {
                entry: "4=0".to_owned()
            },
            ParseWarning::MalformedRowValue {
                tag: "BPMS".to_owned(),
                entry: "8=abc".to_owned()
            },
            ParseWarning::ZeroPause {
                entry: "4=0".to_owned()
            },
            ParseWarning::InvalidTimeSignature {
                entry: "0=0=4".to_owned()
            },
            ParseWarning::UnmatchedHoldTail {
                lane: 3,
                row: Row(64)
            },
            ParseWarning::UnterminatedHold {
                lane: 3,
                row: Row(128)
            },
        ]
    );
    let song = song.expect("anomalies do not abort the load");
    assert_eq!(song.charts[0].notes.len(), 1);
    assert_eq!(song.timing.tempo_at_row(Row(1000)), 120.0);
}

#[test]
fn sub_row_positions_use_declared_resolution() {
    let source = "#BPMS:0=120,r96=240;\n#ROWSPERBEAT:24;\n#NOTES:dance-single::Easy:1::\n0000\n;";
    let song = parse_clean(source);
    assert_eq!(
        song.timing.segments(SegmentKind::Tempo),
        &[
            TimingSegment::tempo(Row(0), 120.0),
            TimingSegment::tempo(Row(192), 240.0),
        ]
    );
}

#[test]
fn stop_pauses_for_its_seconds() {
    let song = parse_clean("#BPMS:0=120;\n#STOPS:4=1.0;\n#NOTES:dance-single::Hard:9::\n1000\n;");
    let timing = &song.timing;

    assert_eq!(
        timing.segments(SegmentKind::Tempo),
        &[TimingSegment::tempo(Row(0), 120.0)]
    );
    assert_eq!(
        timing.segments(SegmentKind::Pause),
        &[TimingSegment::pause(Row(192), 1.0)]
    );
    let (arrival, departure) = timing.elapsed_seconds_span_at_row(Row(192));
    assert_seconds(arrival, 2.0);
    assert_seconds(departure - arrival, 1.0);
}

fn parse_warnings(source: &str) -> (Song, Vec<ParseWarning>) {
    let SmOutput { song, warnings } = parse_sm(source, default_config());
    let warnings = warnings
        .into_iter()
        .filter_map(|warning| match warning {
            SmWarning::ParseWarning(warning) => Some(warning.into_content()),
            _ => None,
        })
        .collect();
    (song.expect("out of range rows do not abort the load"), warnings)
}

#[test]
fn huge_sub_row_position_is_dropped() {
    let (song, warnings) = parse_warnings(
        "#BPMS:0=120,r999999999999999999=150;\n#NOTES:dance-single::Easy:1::\n1000\n;",
    );
    assert_eq!(
        warnings,
        vec![ParseWarning::MalformedRowValue {
            tag: "BPMS".to_owned(),
            entry: "r999999999999999999=150".to_owned(),
        }]
    );
    assert_eq!(
        song.timing.segments(SegmentKind::Tempo),
        &[TimingSegment::tempo(Row(0), 120.0)]
    );
}

#[test]
fn huge_beat_position_is_dropped() {
    let (song, warnings) =
        parse_warnings("#BPMS:0=-60,1e300=120;\n#NOTES:dance-single::Easy:1::\n1000\n;");
    assert_eq!(
        warnings,
        vec![ParseWarning::MalformedRowValue {
            tag: "BPMS".to_owned(),
            entry: "1e300=120".to_owned(),
        }]
    );
    // The negative tempo never recovers, so the rest of the song is skipped.
    assert_eq!(
        song.timing.segments(SegmentKind::Skip),
        &[TimingSegment::skip(Row(0), Row::INFINITE)]
    );
    assert!(song.timing.is_row_skipped(Row(1_000_000)));
}
