use std::{
    fmt::{Display, Formatter},
    sync::atomic::{AtomicUsize, Ordering},
};

use dashmap::DashMap;

use super::FileId;

/// Source of file text for the symbol index.
///
/// The index never touches the filesystem; every read goes through this
/// trait. Failures are reported, never panicked, and callers skip the file.
#[tower_lsp::async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_content(
        &self,
        file: &FileId,
    ) -> Result<String, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The collaborator does not know the file or returned no text.
    Unavailable(FileId),
    /// The request itself failed.
    Transport {
        file: FileId,
        reason: String,
    },
}

impl FetchError {
    pub fn file(&self) -> &FileId {
        match self {
            Self::Unavailable(file) => file,
            Self::Transport {
                file, ..
            } => file,
        }
    }
}

impl Display for FetchError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Unavailable(file) => write!(f, "content of {file} is unavailable"),
            Self::Transport {
                file,
                reason,
            } => {
                write!(f, "failed to fetch {file}: {reason}")
            },
        }
    }
}

impl std::error::Error for FetchError {}

/// In-memory [`ContentFetcher`] keyed by [`FileId`].
///
/// Counts every fetch so callers can observe how much I/O a rebuild did.
#[derive(Debug, Default)]
pub struct MemoryContentFetcher {
    files: DashMap<FileId, String>,
    fetches: AtomicUsize,
}

impl MemoryContentFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &self,
        file: impl Into<FileId>,
        text: impl Into<String>,
    ) {
        self.files.insert(file.into(), text.into());
    }

    pub fn remove(
        &self,
        file: &FileId,
    ) {
        self.files.remove(file);
    }

    /// Total number of `fetch_content` calls, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[tower_lsp::async_trait]
impl ContentFetcher for MemoryContentFetcher {
    async fn fetch_content(
        &self,
        file: &FileId,
    ) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.files.get(file).map(|text| text.value().clone()).ok_or_else(|| FetchError::Unavailable(file.clone()))
    }
}
