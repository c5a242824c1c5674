use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use tower_lsp::Client;
use tracing::{debug, warn};

use crate::{
    document::DocumentStore,
    server::ext::GetFileContent,
    vfs::{ContentFetcher, FetchError, FileId},
};

/// Reads file text from the editor.
///
/// Documents open in the editor are served from their live buffer; every
/// other file costs one `getFileContent` round trip.
pub(crate) struct ClientContentFetcher {
    client: Client,
    documents: Arc<DocumentStore>,
}

impl ClientContentFetcher {
    pub(crate) fn new(
        client: Client,
        documents: Arc<DocumentStore>,
    ) -> Self {
        Self {
            client,
            documents,
        }
    }
}

#[tower_lsp::async_trait]
impl ContentFetcher for ClientContentFetcher {
    async fn fetch_content(
        &self,
        file: &FileId,
    ) -> Result<String, FetchError> {
        if let Some(text) = self.documents.get_content(file) {
            return Ok(text);
        }

        let request = self.client.send_request::<GetFileContent>((file.as_str().to_owned(),));
        match AssertUnwindSafe(request).catch_unwind().await {
            Ok(Ok(Some(text))) => Ok(text),
            Ok(Ok(None)) => {
                debug!("[content] client has no content for {}", file.short_name());
                Err(FetchError::Unavailable(file.clone()))
            },
            Ok(Err(error)) => {
                warn!("[content] getFileContent failed for {}: {error}", file.short_name());
                Err(FetchError::Transport {
                    file: file.clone(),
                    reason: error.to_string(),
                })
            },
            Err(_) => {
                warn!("[content] getFileContent panicked (client may have disconnected)");
                Err(FetchError::Transport {
                    file: file.clone(),
                    reason: "client disconnected".to_string(),
                })
            },
        }
    }
}
