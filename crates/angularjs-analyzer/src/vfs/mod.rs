//! File identity, the tracked file set, and the content source the index
//! reads through.

mod content;
mod file_set;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::Url;

pub use content::{ContentFetcher, FetchError, MemoryContentFetcher};
pub use file_set::FileSet;

/// Opaque, stable identifier for a source file.
///
/// The string is kept exactly as the client sent it so that
/// `getFileContent` round trips use the spelling the client knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_url(url: &Url) -> Self {
        Self(url.as_str().to_owned())
    }

    /// Identifier for a URI that arrived as a plain string in an LSP
    /// payload. Parses through [`Url`] so it spells the same way as ids
    /// built from typed `Url` fields; unparsable strings are kept as is.
    pub fn from_uri_str(uri: &str) -> Self {
        Url::parse(uri).map_or_else(|_| Self::new(uri), |url| Self::from_url(&url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the identifier as a URL, falling back to an absolute path.
    pub fn to_url(&self) -> Option<Url> {
        if let Ok(url) = Url::parse(&self.0) {
            return Some(url);
        }
        Url::from_file_path(Path::new(&self.0)).ok()
    }

    /// Last path segment, for log lines.
    pub fn short_name(&self) -> &str {
        self.0.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&Url> for FileId {
    fn from(value: &Url) -> Self {
        Self::from_url(value)
    }
}

impl std::fmt::Display for FileId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/src/vfs/file_id_tests.rs"]
mod tests;
