//! Test diagnostics module functionality

use simfile_rs::sm::{
    SmWarning, default_config,
    diagnostics::{SimpleSource, ToAriadne, collect_sm_reports, emit_sm_warnings},
    parse_sm,
};

#[test]
fn test_simple_source_creation() {
    let source_text = "#TITLE:Test Song;\n#ARTIST:Test Composer;\n#BPMS:0=120;\n";
    let source = SimpleSource::new("test.sm", source_text);

    assert_eq!(source.text(), source_text);
    assert_eq!(source.name(), "test.sm");
}

#[test]
fn test_emit_warnings_with_real_sm() {
    let source = "#BPMS:0=120,4=0;\n#NOTES:dance-single::Easy:1::\n0030\n;";
    let output = parse_sm(source, default_config());

    assert_eq!(output.warnings.len(), 2);
    emit_sm_warnings("test.sm", source, &output.warnings);
}

#[test]
fn test_empty_warnings() {
    let source = "#TITLE:test;\n#ARTIST:composer;\n";
    let empty_warnings: Vec<SmWarning> = vec![];

    emit_sm_warnings("test.sm", source, &empty_warnings);
    assert!(collect_sm_reports("test.sm", source, &empty_warnings).is_empty());
}

#[test]
fn test_reports_for_each_warning() {
    let source = "#STOPS:1=0,2=x;\n#NOTES:dance-single::Easy:1::\n1000\n;";
    let output = parse_sm(source, default_config());

    let reports = collect_sm_reports("test.sm", source, &output.warnings);
    assert_eq!(reports.len(), output.warnings.len());
    assert_eq!(reports.len(), 2);
}

#[test]
fn test_error_report() {
    let source = "#TITLE:no charts;\n";
    let output = parse_sm(source, default_config());
    let err = output.song.expect_err("a song without charts is unusable");

    let simple = SimpleSource::new("test.sm", source);
    let _report = err.to_report(&simple);
    assert_eq!(err.range(), 0..source.trim_end().len());
}
