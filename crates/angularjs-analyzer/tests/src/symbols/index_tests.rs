use super::*;
use crate::vfs::FileId;

fn declaration(
    name: &str,
    kind: SymbolKind,
    file: &str,
) -> Declaration {
    Declaration {
        name: SymbolName::normalized(name),
        kind,
        location: Location::new(FileId::from(file), 0, 0),
    }
}

#[test]
fn later_insert_replaces_earlier_entry() {
    let mut index = SymbolIndex::new();
    index.insert(declaration("shared", SymbolKind::Component, "a.js"));
    index.insert(declaration("shared", SymbolKind::Directive, "b.js"));

    assert_eq!(index.len(), 1);
    let entry = index.entry("shared").expect("entry");
    assert_eq!(entry.kind, SymbolKind::Directive);
    assert_eq!(entry.location.file.as_str(), "b.js");
}

#[test]
fn lookup_is_case_sensitive() {
    let mut index = SymbolIndex::new();
    index.insert(declaration("myWidget", SymbolKind::Component, "a.js"));
    assert!(index.lookup("myWidget").is_some());
    assert!(index.lookup("mywidget").is_none());
}

#[test]
fn search_is_case_insensitive_sorted_and_limited() {
    let mut index = SymbolIndex::new();
    for name in ["zetaPanel", "alphaPanel", "betaList", "gammaPanel"] {
        index.insert(declaration(name, SymbolKind::Component, "a.js"));
    }

    let names: Vec<_> = index.search("PANEL", 10).into_iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["alphaPanel", "gammaPanel", "zetaPanel"]);
    assert_eq!(index.search("panel", 2).len(), 2);
    assert!(index.search("missing", 10).is_empty());
}
