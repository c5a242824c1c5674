//! Definition provider implementation.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::RwLock;
use tower_lsp::lsp_types::Position;
use tracing::debug;

use crate::{
    definition::{
        answer_cache::{AnswerCache, AnswerKey, Claim},
        symbol_text::word_at_position,
    },
    symbols::{IndexStore, Location, SymbolName},
    vfs::{ContentFetcher, FileId, FileSet},
};

/// How a definition request was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the answer cache without touching the index.
    Cached(Option<Location>),
    /// The same position is already being resolved by another request.
    Pending,
    /// Resolved by this call.
    Resolved(Option<Location>),
}

impl Resolution {
    pub fn into_location(self) -> Option<Location> {
        match self {
            Self::Cached(location) | Self::Resolved(location) => location,
            Self::Pending => None,
        }
    }
}

/// Resolves the component or directive under the cursor to its
/// registration site.
///
/// Answers are memoized per `(document, line, column)`. A miss in the
/// index triggers one full rebuild over the tracked files before giving up.
pub struct DefinitionProvider {
    answers: AnswerCache,
    index: Arc<IndexStore>,
    files: Arc<RwLock<FileSet>>,
    fetcher: Arc<dyn ContentFetcher>,
    rebuild_on_miss: AtomicBool,
}

impl DefinitionProvider {
    pub fn new(
        index: Arc<IndexStore>,
        files: Arc<RwLock<FileSet>>,
        fetcher: Arc<dyn ContentFetcher>,
    ) -> Self {
        Self {
            answers: AnswerCache::new(),
            index,
            files,
            fetcher,
            rebuild_on_miss: AtomicBool::new(true),
        }
    }

    pub fn answers(&self) -> &AnswerCache {
        &self.answers
    }

    pub fn set_rebuild_on_miss(
        &self,
        enabled: bool,
    ) {
        self.rebuild_on_miss.store(enabled, Ordering::Relaxed);
    }

    pub async fn resolve(
        &self,
        document: &FileId,
        text: &str,
        position: Position,
    ) -> Option<Location> {
        self.resolve_detailed(document, text, position).await.into_location()
    }

    pub async fn resolve_detailed(
        &self,
        document: &FileId,
        text: &str,
        position: Position,
    ) -> Resolution {
        let ticket = match self.answers.claim(AnswerKey::new(document.clone(), position)) {
            Claim::Cached(location) => return Resolution::Cached(location),
            Claim::Pending => {
                debug!(
                    "[definition] {}:{}:{} already in flight",
                    document.short_name(),
                    position.line,
                    position.character
                );
                return Resolution::Pending;
            },
            Claim::Claimed(ticket) => ticket,
        };

        let token = word_at_position(text, position);
        let outcome = if token.is_empty() {
            None
        } else {
            self.lookup_or_rebuild(&SymbolName::normalized(token)).await
        };

        if !ticket.complete(outcome.clone()) {
            debug!("[definition] answer for {} invalidated while resolving", document.short_name());
        }
        Resolution::Resolved(outcome)
    }

    async fn lookup_or_rebuild(
        &self,
        name: &SymbolName,
    ) -> Option<Location> {
        if let Some(location) = self.index.lookup(name.as_str()).await {
            return Some(location);
        }
        if !self.rebuild_on_miss.load(Ordering::Relaxed) {
            debug!("[definition] no declaration for {name}");
            return None;
        }

        debug!("[definition] {name} not indexed, rebuilding");
        self.index.rebuild(&self.files, self.fetcher.as_ref()).await;
        self.index.lookup(name.as_str()).await
    }
}

#[cfg(test)]
#[path = "../../tests/src/definition/provider_tests.rs"]
mod tests;
