#![allow(dead_code)]

use std::{collections::HashMap, time::Duration};

use angularjs_analyzer::{AngularLanguageServer, build_service};
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tower::{Service, ServiceExt};
use tower_lsp::{
    ClientSocket, LspService,
    jsonrpc::{Request, Response},
    lsp_types::Position,
};

/// Editor side of the connection: answers `getFileContent` from `files`
/// and every other server request with `null`.
pub struct FakeClient {
    pub socket: ClientSocket,
    pub files: HashMap<String, String>,
    /// URIs the server asked content for, in order.
    pub content_requests: Vec<String>,
    /// Methods of server requests other than `getFileContent`.
    pub server_requests: Vec<String>,
    pub notifications: Vec<Request>,
}

impl FakeClient {
    async fn answer(
        &mut self,
        req: Request,
    ) {
        let Some(id) = req.id().cloned() else {
            self.notifications.push(req);
            return;
        };
        let result = if req.method() == "getFileContent" {
            let uri = req.params().and_then(|params| params.get(0)).and_then(Value::as_str).unwrap_or_default();
            self.content_requests.push(uri.to_string());
            self.files.get(uri).map_or(Value::Null, |text| json!(text))
        } else {
            self.server_requests.push(req.method().to_string());
            Value::Null
        };
        self.socket.send(Response::from_ok(id, result)).await.expect("send client response");
    }
}

pub struct Harness {
    pub service: LspService<AngularLanguageServer>,
    pub client: FakeClient,
    next_id: i64,
}

impl Harness {
    pub async fn start(initialization_options: Value) -> Self {
        let (service, socket) = build_service(false);
        let mut harness = Self {
            service,
            client: FakeClient {
                socket,
                files: HashMap::new(),
                content_requests: Vec::new(),
                server_requests: Vec::new(),
                notifications: Vec::new(),
            },
            next_id: 1,
        };

        let response = harness
            .request(
                "initialize",
                json!({
                    "capabilities": {},
                    "initializationOptions": initialization_options,
                }),
            )
            .await;
        assert!(response.result().is_some(), "initialize should succeed");
        harness.notify("initialized", json!({})).await;
        harness
    }

    pub fn with_file(
        mut self,
        uri: &str,
        text: &str,
    ) -> Self {
        self.client.files.insert(uri.to_string(), text.to_string());
        self
    }

    pub async fn notify(
        &mut self,
        method: &'static str,
        params: Value,
    ) {
        let request = Request::build(method).params(params).finish();
        let response = self.call(request).await;
        assert!(response.is_none(), "{method} should be handled as a notification");
    }

    pub async fn request(
        &mut self,
        method: &'static str,
        params: Value,
    ) -> Response {
        let id = self.next_id;
        self.next_id += 1;
        let request = Request::build(method).params(params).id(id).finish();
        self.call(request).await.expect("request should return a response")
    }

    /// Keep answering server messages until the server has been quiet for
    /// a while, so background rebuilds can finish.
    pub async fn settle(&mut self) {
        loop {
            let next = tokio::time::timeout(Duration::from_millis(300), self.client.socket.next()).await;
            let Ok(Some(req)) = next else {
                break;
            };
            self.client.answer(req).await;
        }
    }

    async fn call(
        &mut self,
        request: Request,
    ) -> Option<Response> {
        let Self {
            service,
            client,
            ..
        } = self;
        let mut call_fut =
            Box::pin(async { service.ready().await.expect("service ready").call(request).await.expect("service call") });

        loop {
            tokio::select! {
                response = &mut call_fut => return response,
                maybe_req = tokio::time::timeout(Duration::from_secs(20), client.socket.next()) => {
                    let req = maybe_req
                        .expect("timed out waiting for server message")
                        .expect("client socket closed unexpectedly");
                    client.answer(req).await;
                }
            }
        }
    }
}

pub fn position_of(
    source: &str,
    needle: &str,
) -> Position {
    let offset = source.find(needle).unwrap_or_else(|| panic!("needle not found: {needle}"));
    let before = &source[..offset];
    let line = before.matches('\n').count() as u32;
    let column = before.rsplit('\n').next().unwrap_or(before).encode_utf16().count() as u32;
    Position::new(line, column)
}
