use tower_lsp::lsp_types::Range;

use super::*;

fn test_doc(text: &str) -> Document {
    Document::new(text.to_string(), 1)
}

fn edit(
    start: (u32, u32),
    end: (u32, u32),
    text: &str,
) -> TextDocumentContentChangeEvent {
    TextDocumentContentChangeEvent {
        range: Some(Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))),
        range_length: None,
        text: text.to_string(),
    }
}

#[test]
fn line_count_counts_trailing_empty_line() {
    assert_eq!(test_doc("").line_count(), 1);
    assert_eq!(test_doc("<div>\n</div>\n").line_count(), 3);
}

#[test]
fn offset_of_uses_utf16_columns() {
    let doc = test_doc("<p>😀</p>\n<my-widget>");
    assert_eq!(doc.offset_of(Position::new(0, 5)), Some(7));
    assert_eq!(doc.offset_of(Position::new(1, 0)), Some(12));
    assert_eq!(doc.offset_of(Position::new(5, 0)), None);
}

#[test]
fn offset_past_line_end_clamps_before_newline() {
    let doc = test_doc("ab\ncd");
    assert_eq!(doc.offset_of(Position::new(0, 40)), Some(2));
    assert_eq!(doc.offset_of(Position::new(1, 40)), Some(5));
}

#[test]
fn set_content_updates_lines() {
    let mut doc = test_doc("one\ntwo");
    assert_eq!(doc.line_count(), 2);
    doc.set_content("a\nb\nc\n".to_string(), 2);
    assert_eq!(doc.line_count(), 4);
    assert_eq!(doc.version, 2);
}

#[test]
fn incremental_change_renames_tag() {
    let mut doc = test_doc("<div>\n  <old-tag></old-tag>\n</div>");
    doc.apply_changes(vec![edit((1, 3), (1, 10), "my-widget"), edit((1, 15), (1, 22), "my-widget")], 2);
    assert_eq!(doc.text, "<div>\n  <my-widget></my-widget>\n</div>");
    assert_eq!(doc.version, 2);
}

#[test]
fn multi_line_insert_updates_following_edits() {
    let mut doc = test_doc("a\nb");
    doc.apply_changes(vec![edit((0, 1), (0, 1), "\nx"), edit((2, 0), (2, 1), "c")], 2);
    assert_eq!(doc.text, "a\nx\nc");
    assert_eq!(doc.line_count(), 3);
}

#[test]
fn out_of_range_edit_is_ignored() {
    let mut doc = test_doc("abc");
    doc.apply_changes(vec![edit((3, 0), (3, 1), "zzz")], 2);
    assert_eq!(doc.text, "abc");
    assert_eq!(doc.version, 2);
}

#[test]
fn full_content_change() {
    let mut doc = test_doc("old content");
    doc.apply_changes(
        vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new content".to_string(),
        }],
        3,
    );
    assert_eq!(doc.text, "new content");
    assert_eq!(doc.version, 3);
}
