//! Handlers for the custom file lifecycle notifications.

use tower_lsp::lsp_types::MessageType;
use tracing::info;

use crate::{
    server::{
        ext::{ExclusionRulesParams, FileParams, FileRenamedParams, ParseJsFilesParams, SetInitialFilesParams},
        state::AngularLanguageServer,
    },
    vfs::FileId,
    workspace::FileEvent,
};

impl AngularLanguageServer {
    pub(crate) async fn set_initial_files(
        &self,
        params: SetInitialFilesParams,
    ) {
        self.replace_file_set(params.files).await;
    }

    /// Legacy form of `angularjs/setInitialFiles`: a bare array of URIs.
    pub(crate) async fn parse_js_files(
        &self,
        params: ParseJsFilesParams,
    ) {
        self.replace_file_set(params.into_files()).await;
    }

    pub(crate) async fn file_deleted(
        &self,
        params: FileParams,
    ) {
        self.dispatch(FileEvent::Deleted(params.file)).await;
    }

    pub(crate) async fn file_renamed(
        &self,
        params: FileRenamedParams,
    ) {
        self.dispatch(FileEvent::Renamed {
            old: params.old_file,
            new: params.new_file,
        })
        .await;
    }

    pub(crate) async fn file_saved(
        &self,
        params: FileParams,
    ) {
        self.dispatch(FileEvent::Saved(params.file)).await;
    }

    pub(crate) async fn file_changed(
        &self,
        params: FileParams,
    ) {
        self.dispatch(FileEvent::Changed(params.file)).await;
    }

    pub(crate) async fn update_exclusion_rules(
        &self,
        params: ExclusionRulesParams,
    ) {
        info!("[server] {} exclusion rule(s) received", params.rules.len());
        self.workspace.update_exclusion_rules(params.rules).await;
    }

    async fn replace_file_set(
        &self,
        files: Vec<FileId>,
    ) {
        let offered = files.len();
        self.dispatch(FileEvent::SetInitial(files)).await;
        let tracked = self.workspace.files_snapshot().await.len();
        info!("[server] tracking {tracked} of {offered} offered file(s)");
        self.log_message(MessageType::INFO, format!("Tracking {tracked} file(s)")).await;
    }
}
