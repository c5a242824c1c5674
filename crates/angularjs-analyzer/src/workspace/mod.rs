//! Live index service: applies file lifecycle events to the tracked file
//! set and the answer cache, and decides which rebuild each one needs.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::RwLock;
use tower_lsp::lsp_types::Position;
use tracing::debug;

use crate::{
    definition::{DefinitionProvider, Resolution},
    symbols::{IndexEntry, IndexStore, Location, RebuildReport, SymbolIndex, SymbolName},
    vfs::{ContentFetcher, FileId, FileSet},
};

/// File lifecycle event forwarded by the editor side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    SetInitial(Vec<FileId>),
    Added(FileId),
    Deleted(FileId),
    Renamed {
        old: FileId,
        new: FileId,
    },
    Saved(FileId),
    Changed(FileId),
}

/// Rebuild an event calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildPlan {
    None,
    Full,
    Incremental(Vec<FileId>),
}

impl RebuildPlan {
    /// Combine the plans of a batch of events into one rebuild.
    pub fn merge(
        self,
        other: RebuildPlan,
    ) -> RebuildPlan {
        match (self, other) {
            (RebuildPlan::Full, _) | (_, RebuildPlan::Full) => RebuildPlan::Full,
            (RebuildPlan::None, plan) | (plan, RebuildPlan::None) => plan,
            (RebuildPlan::Incremental(mut files), RebuildPlan::Incremental(more)) => {
                for file in more {
                    if !files.contains(&file) {
                        files.push(file);
                    }
                }
                RebuildPlan::Incremental(files)
            },
        }
    }
}

/// One workspace symbol match, detached from the index snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolHit {
    pub name: SymbolName,
    pub entry: IndexEntry,
}

pub struct Workspace {
    files: Arc<RwLock<FileSet>>,
    index: Arc<IndexStore>,
    fetcher: Arc<dyn ContentFetcher>,
    definitions: DefinitionProvider,
    indexing_enabled: AtomicBool,
    full_rebuild_on_save: AtomicBool,
}

impl Workspace {
    pub fn new(fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self::with_file_set(fetcher, FileSet::new())
    }

    /// Start from a pre-configured (typically filter-only) file set.
    pub fn with_file_set(
        fetcher: Arc<dyn ContentFetcher>,
        files: FileSet,
    ) -> Self {
        let files = Arc::new(RwLock::new(files));
        let index = Arc::new(IndexStore::new());
        let definitions = DefinitionProvider::new(Arc::clone(&index), Arc::clone(&files), Arc::clone(&fetcher));
        Self {
            files,
            index,
            fetcher,
            definitions,
            indexing_enabled: AtomicBool::new(true),
            full_rebuild_on_save: AtomicBool::new(false),
        }
    }

    /// Mutate the file set and answer cache for `event` and return the
    /// rebuild it requires. Nothing is fetched here.
    pub async fn apply(
        &self,
        event: FileEvent,
    ) -> RebuildPlan {
        let answers = self.definitions.answers();
        match event {
            FileEvent::SetInitial(ids) => {
                let offered = ids.len();
                let accepted = self.files.write().await.set_initial(ids);
                answers.clear();
                debug!("[workspace] initial file set: {accepted} of {offered} file(s) accepted");
                RebuildPlan::Full
            },
            FileEvent::Added(file) => {
                if self.files.write().await.add(file.clone()) {
                    RebuildPlan::Incremental(vec![file])
                } else {
                    debug!("[workspace] ignoring {}", file.short_name());
                    RebuildPlan::None
                }
            },
            FileEvent::Deleted(file) => {
                self.files.write().await.remove(&file);
                answers.invalidate_file(&file);
                RebuildPlan::Full
            },
            FileEvent::Renamed {
                old,
                new,
            } => {
                self.files.write().await.rename(&old, new);
                answers.invalidate_file(&old);
                RebuildPlan::Full
            },
            FileEvent::Saved(file) => {
                answers.invalidate_file(&file);
                if !self.is_tracked(&file).await {
                    RebuildPlan::None
                } else if self.full_rebuild_on_save.load(Ordering::Relaxed) {
                    RebuildPlan::Full
                } else {
                    RebuildPlan::Incremental(vec![file])
                }
            },
            FileEvent::Changed(file) => {
                answers.invalidate_file(&file);
                if self.is_tracked(&file).await {
                    RebuildPlan::Incremental(vec![file])
                } else {
                    RebuildPlan::None
                }
            },
        }
    }

    /// Execute `plan`. Returns `None` when nothing ran, either because the
    /// plan is empty or indexing is disabled.
    pub async fn run(
        &self,
        plan: RebuildPlan,
    ) -> Option<RebuildReport> {
        if !self.indexing_enabled.load(Ordering::Relaxed) {
            return None;
        }
        match plan {
            RebuildPlan::None => None,
            RebuildPlan::Full => Some(self.index.rebuild(&self.files, self.fetcher.as_ref()).await),
            RebuildPlan::Incremental(files) => Some(self.index.rebuild_incremental(&files, self.fetcher.as_ref()).await),
        }
    }

    /// [`apply`](Self::apply) followed by [`run`](Self::run).
    pub async fn handle(
        &self,
        event: FileEvent,
    ) -> Option<RebuildReport> {
        let plan = self.apply(event).await;
        self.run(plan).await
    }

    /// Drop cached answers involving `file` without scheduling a rebuild.
    pub fn invalidate(
        &self,
        file: &FileId,
    ) -> usize {
        self.definitions.answers().invalidate_file(file)
    }

    pub async fn definition(
        &self,
        document: &FileId,
        text: &str,
        position: Position,
    ) -> Option<Location> {
        self.definitions.resolve(document, text, position).await
    }

    pub async fn definition_detailed(
        &self,
        document: &FileId,
        text: &str,
        position: Position,
    ) -> Resolution {
        self.definitions.resolve_detailed(document, text, position).await
    }

    /// Symbols whose name contains `query` (either spelling), sorted by name.
    pub async fn workspace_symbols(
        &self,
        query: &str,
        limit: usize,
    ) -> Vec<SymbolHit> {
        let snapshot = self.index.snapshot().await;
        let query = SymbolName::normalized(query.trim());
        snapshot
            .search(query.as_str(), limit)
            .into_iter()
            .map(|(name, entry)| SymbolHit {
                name: name.clone(),
                entry: entry.clone(),
            })
            .collect()
    }

    /// Replace the exclusion rules; already tracked files stay.
    pub async fn update_exclusion_rules<S: AsRef<str>>(
        &self,
        rules: impl IntoIterator<Item = S>,
    ) {
        self.files.write().await.update_exclusions(rules);
    }

    pub async fn set_file_extensions<S: AsRef<str>>(
        &self,
        extensions: impl IntoIterator<Item = S>,
    ) {
        self.files.write().await.set_extensions(extensions);
    }

    pub fn set_indexing_enabled(
        &self,
        enabled: bool,
    ) {
        self.indexing_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn set_full_rebuild_on_save(
        &self,
        enabled: bool,
    ) {
        self.full_rebuild_on_save.store(enabled, Ordering::Relaxed);
    }

    pub fn set_rebuild_on_miss(
        &self,
        enabled: bool,
    ) {
        self.definitions.set_rebuild_on_miss(enabled);
    }

    pub async fn is_tracked(
        &self,
        file: &FileId,
    ) -> bool {
        self.files.read().await.contains(file)
    }

    pub async fn files_snapshot(&self) -> Vec<FileId> {
        self.files.read().await.files().to_vec()
    }

    pub async fn index_snapshot(&self) -> Arc<SymbolIndex> {
        self.index.snapshot().await
    }
}

#[cfg(test)]
#[path = "../../tests/src/workspace/workspace_tests.rs"]
mod tests;
