//! `$/progress` reporting for index rebuilds and definition lookups.
//!
//! ```ignore
//! let token = ProgressToken::begin(&client, "Indexing components", None).await;
//! // ... rebuild ...
//! token.end(Some("42 symbols".into())).await;
//! ```

use std::{
    panic::AssertUnwindSafe,
    sync::atomic::{AtomicU64, Ordering},
};

use futures::FutureExt;
use tower_lsp::{Client, lsp_types::*};
use tracing::{debug, warn};

static NEXT_PROGRESS_ID: AtomicU64 = AtomicU64::new(1);
const PROGRESS_TITLE_PREFIX: &str = "angularjs-analyzer:";

/// An open work-done progress session.
///
/// [`begin`](Self::begin) creates the token on the client and sends
/// `Begin`; [`end`](Self::end) sends `End`. A token dropped without `end`
/// (the task was aborted or the request cancelled) still sends `End` from a
/// spawned task so the editor never keeps a stale spinner.
pub struct ProgressToken {
    session: Option<(Client, NumberOrString)>,
}

impl ProgressToken {
    pub async fn begin(
        client: &Client,
        title: &str,
        message: Option<String>,
    ) -> Self {
        let id = NEXT_PROGRESS_ID.fetch_add(1, Ordering::Relaxed);
        let token = NumberOrString::String(progress_token_name(title, id));
        let title = prefixed_progress_title(title);

        // The create request is awaited off the caller's path; its response
        // may never come from editors without progress support.
        let create_client = client.clone();
        let create_token = token.clone();
        tokio::spawn(async move {
            let params = WorkDoneProgressCreateParams {
                token: create_token,
            };
            match AssertUnwindSafe(create_client.send_request::<request::WorkDoneProgressCreate>(params))
                .catch_unwind()
                .await
            {
                Ok(Ok(())) => {},
                Ok(Err(error)) => debug!("workDoneProgress/create rejected: {error}"),
                Err(_) => warn!("workDoneProgress/create panicked (client may have disconnected)"),
            }
        });

        let begin = WorkDoneProgress::Begin(WorkDoneProgressBegin {
            title: title.clone(),
            cancellable: Some(false),
            message,
            percentage: None,
        });
        if !send_progress(client, token.clone(), begin).await {
            warn!("progress begin for {title:?} could not be sent");
            return Self {
                session: None,
            };
        }

        debug!("progress begin: {title}");
        Self {
            session: Some((client.clone(), token)),
        }
    }

    pub async fn end(
        mut self,
        message: Option<String>,
    ) {
        let Some((client, token)) = self.session.take() else {
            return;
        };
        debug!("progress end: {token:?}");
        send_progress(
            &client,
            token,
            WorkDoneProgress::End(WorkDoneProgressEnd {
                message,
            }),
        )
        .await;
    }
}

impl Drop for ProgressToken {
    fn drop(&mut self) {
        let Some((client, token)) = self.session.take() else {
            return;
        };
        debug!("progress dropped before end: {token:?}");
        tokio::spawn(async move {
            let end = WorkDoneProgress::End(WorkDoneProgressEnd {
                message: Some("Cancelled".to_string()),
            });
            send_progress(&client, token, end).await;
        });
    }
}

/// Returns `false` when sending panicked (client gone).
async fn send_progress(
    client: &Client,
    token: NumberOrString,
    value: WorkDoneProgress,
) -> bool {
    let params = ProgressParams {
        token,
        value: ProgressParamsValue::WorkDone(value),
    };
    AssertUnwindSafe(client.send_notification::<notification::Progress>(params)).catch_unwind().await.is_ok()
}

fn progress_token_name(
    title: &str,
    id: u64,
) -> String {
    let slug: String =
        title.trim().chars().map(|ch| if ch.is_ascii_alphanumeric() { ch.to_ascii_lowercase() } else { '-' }).collect();
    format!("angularjsAnalyzer/{slug}/{id}")
}

fn prefixed_progress_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.starts_with(PROGRESS_TITLE_PREFIX) {
        return trimmed.to_owned();
    }
    format!("{PROGRESS_TITLE_PREFIX} {trimmed}")
}

#[cfg(test)]
#[path = "../tests/src/progress_tests.rs"]
mod tests;
