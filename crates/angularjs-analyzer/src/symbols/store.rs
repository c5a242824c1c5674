use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::{
    symbols::{index::SymbolIndex, scanner::scan_declarations, types::Location},
    vfs::{ContentFetcher, FileId, FileSet},
};

/// Counters for one rebuild pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Files whose content was fetched and scanned.
    pub indexed: usize,
    /// Files skipped because their content could not be fetched.
    pub skipped: usize,
    /// Entries in the resulting index.
    pub symbols: usize,
}

#[derive(Debug)]
pub struct IndexBuild {
    pub index: SymbolIndex,
    pub report: RebuildReport,
}

/// Build a fresh index over `files`, in order.
///
/// Content is fetched one file at a time. A file that cannot be fetched is
/// skipped; the build never fails as a whole.
pub async fn build_index(
    files: &[FileId],
    fetcher: &dyn ContentFetcher,
) -> IndexBuild {
    extend_index(SymbolIndex::new(), files, fetcher).await
}

/// Re-scan `files` on top of a copy of `existing`.
///
/// Only names found in `files` are overwritten. Names that disappeared from
/// those files are **not** removed, and entries from other files are left
/// alone; only [`build_index`] over the whole file set drops stale entries.
pub async fn build_index_incremental(
    existing: &SymbolIndex,
    files: &[FileId],
    fetcher: &dyn ContentFetcher,
) -> IndexBuild {
    extend_index(existing.clone(), files, fetcher).await
}

async fn extend_index(
    mut index: SymbolIndex,
    files: &[FileId],
    fetcher: &dyn ContentFetcher,
) -> IndexBuild {
    let mut report = RebuildReport::default();
    for file in files {
        let text = match fetcher.fetch_content(file).await {
            Ok(text) => text,
            Err(error) => {
                debug!("[index] skipping {}: {error}", error.file().short_name());
                report.skipped += 1;
                continue;
            },
        };
        for declaration in scan_declarations(file, &text) {
            index.insert(declaration);
        }
        report.indexed += 1;
    }
    report.symbols = index.len();
    IndexBuild {
        index,
        report,
    }
}

/// Owner of the published [`SymbolIndex`].
///
/// Readers get the last completed snapshot; a rebuild swaps in its result
/// only once it is complete. Rebuilds run one at a time, so an incremental
/// pass always starts from the newest published snapshot.
pub struct IndexStore {
    current: RwLock<Arc<SymbolIndex>>,
    rebuild_gate: Mutex<()>,
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(SymbolIndex::new())),
            rebuild_gate: Mutex::new(()),
        }
    }

    pub async fn snapshot(&self) -> Arc<SymbolIndex> {
        Arc::clone(&*self.current.read().await)
    }

    pub async fn lookup(
        &self,
        name: &str,
    ) -> Option<Location> {
        self.snapshot().await.lookup(name).cloned()
    }

    /// Full rebuild over the files tracked in `files`: discards every
    /// previous entry.
    ///
    /// The file list is read once the gate is held, so a rebuild queued
    /// behind another one sees every file-set change made while it waited.
    pub async fn rebuild(
        &self,
        files: &RwLock<FileSet>,
        fetcher: &dyn ContentFetcher,
    ) -> RebuildReport {
        let _gate = self.rebuild_gate.lock().await;
        let files = files.read().await.files().to_vec();
        let build = build_index(&files, fetcher).await;
        self.publish(build.index).await;
        info!(
            "[index] full rebuild: {} file(s) indexed, {} skipped, {} symbol(s)",
            build.report.indexed, build.report.skipped, build.report.symbols
        );
        build.report
    }

    /// Incremental rebuild; see [`build_index_incremental`] for what it
    /// does not purge.
    pub async fn rebuild_incremental(
        &self,
        files: &[FileId],
        fetcher: &dyn ContentFetcher,
    ) -> RebuildReport {
        let _gate = self.rebuild_gate.lock().await;
        let base = self.snapshot().await;
        let build = build_index_incremental(&base, files, fetcher).await;
        self.publish(build.index).await;
        debug!(
            "[index] incremental rebuild of {} file(s): {} skipped, {} symbol(s)",
            files.len(),
            build.report.skipped,
            build.report.symbols
        );
        build.report
    }

    async fn publish(
        &self,
        index: SymbolIndex,
    ) {
        *self.current.write().await = Arc::new(index);
    }
}

#[cfg(test)]
#[path = "../../tests/src/symbols/store_tests.rs"]
mod tests;
