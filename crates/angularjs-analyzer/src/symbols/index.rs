use std::collections::HashMap;

use crate::symbols::types::{Declaration, Location, SymbolKind, SymbolName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub location: Location,
    pub kind: SymbolKind,
}

/// Immutable-once-published map from symbol name to its declaration.
///
/// A name has exactly one entry; a later insert for the same name replaces
/// the earlier one (no duplicate-declaration diagnostics).
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    entries: HashMap<SymbolName, IndexEntry>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        declaration: Declaration,
    ) {
        self.entries.insert(
            declaration.name,
            IndexEntry {
                location: declaration.location,
                kind: declaration.kind,
            },
        );
    }

    /// `name` is expected to be normalized already.
    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<&Location> {
        self.entries.get(name).map(|entry| &entry.location)
    }

    pub fn entry(
        &self,
        name: &str,
    ) -> Option<&IndexEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring search, sorted by name, at most `limit` hits.
    pub fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Vec<(&SymbolName, &IndexEntry)> {
        let query_lower = query.to_lowercase();
        let mut hits: Vec<_> =
            self.entries.iter().filter(|(name, _)| name.as_str().to_lowercase().contains(&query_lower)).collect();
        hits.sort_by(|a, b| a.0.cmp(b.0));
        hits.truncate(limit);
        hits
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/index_tests.rs"]
mod tests;
