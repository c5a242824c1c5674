use dashmap::DashMap;
use tower_lsp::lsp_types::TextDocumentContentChangeEvent;

use super::Document;
use crate::vfs::FileId;

/// Open documents keyed by [`FileId`].
///
/// Definition requests read the cursor line from here, and
/// `getFileContent` is skipped for files the editor already has open.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<FileId, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(
        &self,
        file: FileId,
        text: String,
        version: i32,
    ) {
        self.documents.insert(file, Document::new(text, version));
    }

    /// Replace the whole text, opening the document if it is not tracked.
    pub fn update(
        &self,
        file: FileId,
        text: String,
        version: i32,
    ) {
        match self.documents.get_mut(&file) {
            Some(mut doc) => doc.set_content(text, version),
            None => {
                self.documents.insert(file, Document::new(text, version));
            },
        }
    }

    /// Apply incremental edits. Returns `false` for an unknown document.
    pub fn apply_changes(
        &self,
        file: &FileId,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> bool {
        let Some(mut doc) = self.documents.get_mut(file) else {
            return false;
        };
        doc.apply_changes(changes, version);
        true
    }

    pub fn close(
        &self,
        file: &FileId,
    ) -> bool {
        self.documents.remove(file).is_some()
    }

    pub fn get_content(
        &self,
        file: &FileId,
    ) -> Option<String> {
        self.documents.get(file).map(|doc| doc.text.clone())
    }

    pub fn version(
        &self,
        file: &FileId,
    ) -> Option<i32> {
        self.documents.get(file).map(|doc| doc.version)
    }

    pub fn is_open(
        &self,
        file: &FileId,
    ) -> bool {
        self.documents.contains_key(file)
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/document_store_tests.rs"]
mod tests;
