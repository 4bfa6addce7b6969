use pretty_assertions::assert_eq;
use simfile_rs::sm::prelude::*;

#[test]
fn timeline_feeds_timing_data() {
    let beat = |beat: f64| Row::from_beat(beat);
    let TempoTimeline {
        segments,
        offset_adjustment,
    } = build_tempo_timeline(
        &[(beat(0.0), 120.0), (beat(4.0), -120.0), (beat(6.0), 120.0)],
        &[(beat(-1.0), 0.5)],
    );
    assert_eq!(offset_adjustment, -0.5);

    let mut timing = TimingData::new();
    for segment in segments {
        timing.insert(segment);
    }
    timing.adjust_global_offset(offset_adjustment);

    assert_eq!(
        timing.segments(SegmentKind::Skip),
        &[TimingSegment::skip(beat(4.0), beat(4.0))]
    );
    assert!(timing.is_row_skipped(beat(7.0)));
    assert!(!timing.is_row_skipped(beat(8.0)));
    assert_eq!(timing.elapsed_seconds_at_beat(4.0), 2.5);
    assert_eq!(timing.elapsed_seconds_at_beat(8.0), 2.5);
}

#[test]
fn repeated_values_are_elided() {
    let mut timing = TimingData::new();
    timing.insert(TimingSegment::tempo(Row(0), 140.0));
    timing.insert(TimingSegment::tempo(Row(96), 140.0));
    timing.insert(TimingSegment::new(
        Row(0),
        SegmentValue::Scroll { ratio: 1.0 },
    ));
    timing.insert(TimingSegment::new(
        Row(48),
        SegmentValue::Scroll { ratio: 1.0 },
    ));

    assert_eq!(timing.segments(SegmentKind::Tempo).len(), 1);
    assert_eq!(timing.segments(SegmentKind::Scroll).len(), 1);
    assert_eq!(timing.tempo_range(), Some((140.0, 140.0)));
}

#[test]
fn empty_timing_uses_default_tempo() {
    let timing = TimingData::new();
    assert!(timing.is_empty());
    assert_eq!(timing.tempo_at_row(Row(480)), DEFAULT_TEMPO);
    assert_eq!(timing.elapsed_seconds_at_beat(3.0), 3.0);
    assert_eq!(timing.time_signature_at_row(Row(0)), (4, 4));
}
