use super::*;

#[test]
fn word_at_selects_hyphenated_tag() {
    let line = r#"  <my-widget items="vm.items"></my-widget>"#;
    assert_eq!(word_at(line, 5), "my-widget");
    assert_eq!(word_at(line, 3), "my-widget");
}

#[test]
fn word_at_includes_both_boundaries() {
    let line = "<foo-bar>";
    // `foo-bar` spans columns 1..8.
    assert_eq!(word_at(line, 1), "foo-bar");
    assert_eq!(word_at(line, 8), "foo-bar");
    assert_eq!(word_at(line, 0), "");
}

#[test]
fn word_at_prefers_first_match_when_boundaries_touch() {
    // Column 3 is the end of `abc` and no other word starts there.
    assert_eq!(word_at("abc def", 3), "abc");
    assert_eq!(word_at("abc def", 4), "def");
}

#[test]
fn word_at_without_match_is_empty() {
    assert_eq!(word_at("   <>  ", 2), "");
    assert_eq!(word_at("", 0), "");
    assert_eq!(word_at("abc", 40), "");
}

#[test]
fn word_at_uses_utf16_columns() {
    let line = "😀 <x-pane>";
    // The emoji is two UTF-16 units, so `x-pane` starts at column 4.
    assert_eq!(word_at(line, 4), "x-pane");
    assert_eq!(word_at(line, 10), "x-pane");
}

#[test]
fn word_at_position_reads_the_requested_line() {
    let text = "<div>\r\n  <user-card></user-card>\n</div>";
    assert_eq!(word_at_position(text, Position::new(1, 4)), "user-card");
    assert_eq!(word_at_position(text, Position::new(7, 0)), "");
}
