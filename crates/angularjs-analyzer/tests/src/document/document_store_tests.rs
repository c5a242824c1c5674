use tower_lsp::lsp_types::{Position, Range};

use super::*;

fn file() -> FileId {
    FileId::from("file:///app/index.html")
}

#[test]
fn store_open_get_content_close() {
    let store = DocumentStore::new();
    store.open(file(), "<my-widget></my-widget>".to_string(), 1);

    assert_eq!(store.get_content(&file()), Some("<my-widget></my-widget>".to_string()));
    assert!(store.is_open(&file()));

    assert!(store.close(&file()));
    assert!(store.get_content(&file()).is_none());
    assert!(!store.close(&file()));
}

#[test]
fn store_update_existing() {
    let store = DocumentStore::new();
    store.open(file(), "v1".to_string(), 1);
    store.update(file(), "v2".to_string(), 2);
    assert_eq!(store.get_content(&file()).as_deref(), Some("v2"));
    assert_eq!(store.version(&file()), Some(2));
}

#[test]
fn store_update_unknown_creates() {
    let store = DocumentStore::new();
    store.update(FileId::from("file:///app/new.js"), "content".to_string(), 1);
    assert!(store.is_open(&FileId::from("file:///app/new.js")));
}

#[test]
fn apply_changes_to_unknown_document_is_reported() {
    let store = DocumentStore::new();
    let change = TextDocumentContentChangeEvent {
        range: Some(Range::new(Position::new(0, 0), Position::new(0, 0))),
        range_length: None,
        text: "x".to_string(),
    };
    assert!(!store.apply_changes(&file(), vec![change.clone()], 2));

    store.open(file(), "<div>".to_string(), 1);
    assert!(store.apply_changes(&file(), vec![change], 2));
    assert_eq!(store.get_content(&file()).as_deref(), Some("x<div>"));
}
