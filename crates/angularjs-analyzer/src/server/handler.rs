use std::time::{Duration, Instant};

use tower_lsp::{LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info};

use crate::{
    definition::Resolution,
    progress::ProgressToken,
    server::{settings::ServerSettings, state::AngularLanguageServer},
    vfs::FileId,
    workspace::{FileEvent, RebuildPlan},
};

const WORKSPACE_SYMBOL_LIMIT: usize = 256;

#[tower_lsp::async_trait]
impl LanguageServer for AngularLanguageServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing angularjs-analyzer...");

        let initial_settings = ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.apply_settings(initial_settings).await;

        let rename_filter = FileOperationFilter {
            scheme: Some("file".to_string()),
            pattern: FileOperationPattern {
                glob: "**/*".to_string(),
                matches: None,
                options: None,
            },
        };

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                definition_provider: Some(OneOf::Left(true)),
                workspace_symbol_provider: Some(OneOf::Left(true)),
                workspace: Some(WorkspaceServerCapabilities {
                    workspace_folders: None,
                    file_operations: Some(WorkspaceFileOperationsServerCapabilities {
                        did_rename: Some(FileOperationRegistrationOptions {
                            filters: vec![rename_filter],
                        }),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "angularjs-analyzer".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        let settings = self.settings_snapshot().await;
        info!(
            "angularjs-analyzer initialized (indexing {}, {} exclusion rule(s))",
            if settings.indexing.enable { "enabled" } else { "disabled" },
            settings.indexing.exclude_paths.len()
        );
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }

        let indexing_turned_on = merged.indexing.enable && !current.indexing.enable;
        self.apply_settings(merged).await;
        info!("Applied updated angularjs-analyzer settings");

        // Events that arrived while indexing was off only touched the file set.
        if indexing_turned_on {
            self.schedule_rebuild(RebuildPlan::Full).await;
        }
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down angularjs-analyzer");
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let file = FileId::from_url(&params.text_document.uri);
        let version = params.text_document.version;
        debug!("Opened {} (v{version}, {} bytes)", file.short_name(), params.text_document.text.len());

        self.document_store.open(file.clone(), params.text_document.text, version);
        self.workspace.invalidate(&file);
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let file = FileId::from_url(&params.text_document.uri);
        let version = params.text_document.version;
        if !self.document_store.apply_changes(&file, params.content_changes, version) {
            debug!("Change for unopened document {}", file.short_name());
            return;
        }

        // Answers computed from the old text are stale right away; the
        // re-index waits for the edits to settle.
        self.workspace.invalidate(&file);
        let settings = self.settings_snapshot().await;
        if !settings.indexing.enable || !self.workspace.is_tracked(&file).await {
            return;
        }

        let generation = {
            let mut current = self.change_generation.entry(file.clone()).or_insert(0);
            *current += 1;
            *current
        };
        let generations = self.change_generation.clone();
        let workspace = self.workspace.clone();
        let debounce = Duration::from_millis(settings.indexing.debounce_ms);
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if generations.get(&file).is_none_or(|latest| *latest != generation) {
                return;
            }
            if let Some(report) = workspace.handle(FileEvent::Changed(file.clone())).await {
                debug!("Re-indexed {} after edit ({} symbol(s))", file.short_name(), report.symbols);
            }
        });
    }

    async fn did_save(
        &self,
        params: DidSaveTextDocumentParams,
    ) {
        let file = FileId::from_url(&params.text_document.uri);
        if let Some(text) = params.text {
            self.document_store.update(file.clone(), text, self.document_store.version(&file).unwrap_or(0));
        }
        debug!("Saved {}", file.short_name());
        self.change_generation.remove(&file);
        self.dispatch(FileEvent::Saved(file)).await;
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        let file = FileId::from_url(&params.text_document.uri);
        self.document_store.close(&file);
        self.change_generation.remove(&file);
        // Unsaved edits are gone; cached answers may no longer match disk.
        self.workspace.invalidate(&file);
    }

    async fn did_change_watched_files(
        &self,
        params: DidChangeWatchedFilesParams,
    ) {
        let mut plan = RebuildPlan::None;
        for change in params.changes {
            let file = FileId::from_url(&change.uri);
            let event = match change.typ {
                FileChangeType::CREATED => FileEvent::Added(file),
                FileChangeType::DELETED => FileEvent::Deleted(file),
                _ => FileEvent::Changed(file),
            };
            plan = plan.merge(self.workspace.apply(event).await);
        }
        self.schedule_rebuild(plan).await;
    }

    async fn did_rename_files(
        &self,
        params: RenameFilesParams,
    ) {
        let mut plan = RebuildPlan::None;
        for rename in params.files {
            let event = FileEvent::Renamed {
                old: FileId::from_uri_str(&rename.old_uri),
                new: FileId::from_uri_str(&rename.new_uri),
            };
            plan = plan.merge(self.workspace.apply(event).await);
        }
        self.schedule_rebuild(plan).await;
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let document = FileId::from_url(&uri);

        let Some(text) = self.document_store.get_content(&document) else {
            return Ok(None);
        };

        let progress = ProgressToken::begin(&self.client, "Definition", Some("Finding definition…".to_string())).await;
        let start = Instant::now();
        let resolution = self.workspace.definition_detailed(&document, &text, position).await;
        let elapsed = start.elapsed();

        let at = format!("{}:{}:{}", document.short_name(), position.line + 1, position.character + 1);
        let (how, location) = match resolution {
            Resolution::Cached(location) => ("cached", location),
            Resolution::Resolved(location) => ("resolved", location),
            Resolution::Pending => ("pending", None),
        };
        let response = location.as_ref().and_then(|location| location.to_lsp()).map(GotoDefinitionResponse::Scalar);

        match &location {
            Some(target) => {
                let target = format!("{}:{}", target.file.short_name(), target.line + 1);
                debug!("goto-def {at} → {target} ({how}, {elapsed:?})");
                progress.end(Some(format!("Resolved definition: {target}"))).await;
            },
            None => {
                debug!("goto-def {at} → none ({how}, {elapsed:?})");
                progress.end(Some("No definition found".to_string())).await;
            },
        }
        Ok(response)
    }

    async fn symbol(
        &self,
        params: WorkspaceSymbolParams,
    ) -> Result<Option<Vec<SymbolInformation>>> {
        let hits = self.workspace.workspace_symbols(&params.query, WORKSPACE_SYMBOL_LIMIT).await;
        #[allow(deprecated)]
        let symbols = hits
            .into_iter()
            .filter_map(|hit| {
                let location = hit.entry.location.to_lsp()?;
                Some(SymbolInformation {
                    name: hit.name.to_string(),
                    kind: hit.entry.kind.to_lsp(),
                    tags: None,
                    deprecated: None,
                    location,
                    container_name: Some(hit.entry.kind.as_str().to_string()),
                })
            })
            .collect();
        Ok(Some(symbols))
    }
}
