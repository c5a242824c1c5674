use std::{panic::AssertUnwindSafe, sync::Arc};

use dashmap::DashMap;
use futures::FutureExt;
use tokio::sync::RwLock;
use tower_lsp::{Client, lsp_types::MessageType};
use tracing::{debug, info};

use crate::{
    document::DocumentStore,
    progress::ProgressToken,
    server::{content::ClientContentFetcher, settings::ServerSettings},
    vfs::{FileId, FileSet},
    workspace::{FileEvent, RebuildPlan, Workspace},
};

const CLIENT_NOTIFICATION_PREFIX: &str = "angularjs-analyzer:";

/// The angularjs-analyzer backend that implements the Language Server Protocol.
pub struct AngularLanguageServer {
    pub(crate) client: Client,

    /// Open documents; also the first place file content is read from.
    pub(crate) document_store: Arc<DocumentStore>,

    /// File set, symbol index and definition answers.
    pub(crate) workspace: Arc<Workspace>,

    /// Debounce generation per edited document.
    ///
    /// Bumped on every `did_change`; a delayed re-index only runs if its
    /// generation is still the latest when the delay expires.
    pub(crate) change_generation: Arc<DashMap<FileId, u64>>,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,

    /// Mirror rebuild summaries to the client log (`--log-messages`).
    log_messages: bool,
}

impl AngularLanguageServer {
    pub fn new(
        client: Client,
        log_messages: bool,
    ) -> Self {
        let settings = ServerSettings::default();
        let document_store = Arc::new(DocumentStore::new());
        let fetcher = Arc::new(ClientContentFetcher::new(client.clone(), Arc::clone(&document_store)));

        let mut filters = FileSet::new();
        filters.update_exclusions(&settings.indexing.exclude_paths);
        filters.set_extensions(&settings.indexing.file_extensions);
        let workspace = Arc::new(Workspace::with_file_set(fetcher, filters));

        Self {
            client,
            document_store,
            workspace,
            change_generation: Arc::new(DashMap::new()),
            settings: Arc::new(RwLock::new(settings)),
            log_messages,
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    /// Push `settings` into the workspace and store them.
    ///
    /// File filters are only re-applied when they differ from the stored
    /// settings, so exclusion rules received through
    /// `angularjs/updateExclusionRules` survive unrelated configuration
    /// changes.
    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        let mut current = self.settings.write().await;
        if current.indexing.exclude_paths != settings.indexing.exclude_paths {
            self.workspace.update_exclusion_rules(&settings.indexing.exclude_paths).await;
        }
        if current.indexing.file_extensions != settings.indexing.file_extensions {
            self.workspace.set_file_extensions(&settings.indexing.file_extensions).await;
        }
        self.workspace.set_indexing_enabled(settings.indexing.enable);
        self.workspace.set_full_rebuild_on_save(settings.indexing.full_rebuild_on_save);
        self.workspace.set_rebuild_on_miss(settings.definition.rebuild_on_miss);
        *current = settings;
    }

    /// Apply `event` now and run the rebuild it calls for in the background.
    pub(crate) async fn dispatch(
        &self,
        event: FileEvent,
    ) {
        debug!("[server] {event:?}");
        let plan = self.workspace.apply(event).await;
        self.schedule_rebuild(plan).await;
    }

    pub(crate) async fn schedule_rebuild(
        &self,
        plan: RebuildPlan,
    ) {
        let settings = self.settings_snapshot().await;
        if plan == RebuildPlan::None || !settings.indexing.enable {
            return;
        }

        let workspace = Arc::clone(&self.workspace);
        let client = self.client.clone();
        let mirror_to_client = self.log_messages && settings.logging.level.allows_info();
        tokio::spawn(async move {
            let progress = match plan {
                RebuildPlan::Full => Some(ProgressToken::begin(&client, "Indexing components", None).await),
                _ => None,
            };
            let Some(report) = workspace.run(plan).await else {
                return;
            };
            if let Some(progress) = progress {
                progress.end(Some(format!("{} symbol(s) in {} file(s)", report.symbols, report.indexed))).await;
            }
            info!(
                "[server] index now holds {} symbol(s) ({} file(s) indexed, {} skipped)",
                report.symbols, report.indexed, report.skipped
            );
            if mirror_to_client {
                let message = format!("Indexed {} file(s), {} symbol(s)", report.indexed, report.symbols);
                log_to_client(&client, MessageType::LOG, message).await;
            }
        });
    }

    /// `window/logMessage`, gated by `logging.level`.
    pub(crate) async fn log_message(
        &self,
        typ: MessageType,
        message: impl AsRef<str>,
    ) {
        let level = self.settings.read().await.logging.level;
        let allowed = match typ {
            MessageType::ERROR => true,
            MessageType::WARNING => level.allows_warn(),
            _ => level.allows_info(),
        };
        if allowed {
            log_to_client(&self.client, typ, message).await;
        }
    }
}

async fn log_to_client(
    client: &Client,
    typ: MessageType,
    message: impl AsRef<str>,
) {
    let _ = AssertUnwindSafe(client.log_message(typ, prefixed_client_message(message))).catch_unwind().await;
}

pub(crate) fn prefixed_client_message(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}
