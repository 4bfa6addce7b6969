use pretty_assertions::assert_eq;
use simfile_rs::sm::{default_config, lex, parse_sm};

#[test]
fn record_without_terminator_ends_at_next_tag() {
    let source = "#TITLE:Warp Zone\n#ARTIST:Test Unit\n#BPMS:0=120;";
    let tokens = lex::parse(source, true).tokens;

    let tags: Vec<_> = tokens
        .iter()
        .filter_map(|token| token.content().tag())
        .collect();
    assert_eq!(tags, vec!["TITLE", "ARTIST", "BPMS"]);
    assert_eq!(tokens[0].content().param(1), "Warp Zone");
    assert_eq!(tokens[1].content().param(1), "Test Unit");
}

#[test]
fn escaped_separators_stay_in_value() {
    let source = "#TITLE:Re\\:Union\\;;\n#NOTES:dance-single::Easy:1::\n0000\n;";
    let song = parse_sm(source, default_config())
        .song
        .expect("the song must be parsed");
    assert_eq!(song.metadata.title, "Re:Union;");

    let song = parse_sm(source, default_config().escapes(false))
        .song
        .expect("the song must be parsed");
    assert_eq!(song.metadata.title, "Re\\:Union\\");
}

#[test]
fn comments_are_ignored() {
    let source = "// header\n#TITLE:Commented // trailing\n;\n#NOTES:dance-single::Easy:1::\n1000\n// first\n;";
    let song = parse_sm(source, default_config())
        .song
        .expect("the song must be parsed");
    assert_eq!(song.metadata.title, "Commented");
    assert_eq!(song.charts[0].notes.len(), 1);
}
