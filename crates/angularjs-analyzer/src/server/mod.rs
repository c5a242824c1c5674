pub(crate) mod content;
pub mod ext;
pub(crate) mod handler;
pub(crate) mod notifications;
pub mod settings;
pub(crate) mod state;

use tower_lsp::{ClientSocket, LspService};

pub use state::AngularLanguageServer;

/// Build the service with every custom method registered.
pub fn build_service(log_messages: bool) -> (LspService<AngularLanguageServer>, ClientSocket) {
    LspService::build(|client| AngularLanguageServer::new(client, log_messages))
        .custom_method(ext::SET_INITIAL_FILES, AngularLanguageServer::set_initial_files)
        .custom_method(ext::PARSE_JS_FILES, AngularLanguageServer::parse_js_files)
        .custom_method(ext::FILE_DELETED, AngularLanguageServer::file_deleted)
        .custom_method(ext::FILE_RENAMED, AngularLanguageServer::file_renamed)
        .custom_method(ext::FILE_SAVED, AngularLanguageServer::file_saved)
        .custom_method(ext::FILE_CHANGED, AngularLanguageServer::file_changed)
        .custom_method(ext::UPDATE_EXCLUSION_RULES, AngularLanguageServer::update_exclusion_rules)
        .finish()
}
