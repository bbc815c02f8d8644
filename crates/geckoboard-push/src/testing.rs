//! Test utilities for geckoboard-push
//!
//! [`TestServer`] runs a local stand-in for the push service so integration
//! tests can exercise the real HTTP transport.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

use crate::{Configuration, PushClient};

/// A push request captured by [`TestServer`]
#[derive(Debug, Clone)]
pub struct ReceivedPush {
    pub api_version: String,
    pub widget_key: String,
    /// Request body; kept as a JSON string if it did not parse
    pub body: Value,
}

#[derive(Clone)]
struct ServerState {
    response: Arc<str>,
    received: Arc<Mutex<Vec<ReceivedPush>>>,
}

/// A push service stand-in that shuts down when dropped
///
/// The server owns its own tokio runtime, so it can be used from plain
/// `#[test]` functions alongside the blocking client.
pub struct TestServer {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedPush>>>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    runtime: Option<Runtime>,
}

impl TestServer {
    /// Start a server that accepts every push
    pub fn start() -> std::io::Result<Self> {
        Self::with_response(r#"{"success":true}"#)
    }

    /// Start a server that answers every push with `body`
    ///
    /// # Example
    ///
    /// ```ignore
    /// let server = TestServer::with_response(r#"{"success":false,"error":"boom"}"#)?;
    /// let client = server.client("widget", "secret")?;
    /// assert!(client.geckometer(1.0, 0.0, 2.0).is_err());
    /// ```
    pub fn with_response(body: impl Into<String>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        // Bind to any available port
        let listener = runtime.block_on(TcpListener::bind("127.0.0.1:0"))?;
        let addr = listener.local_addr()?;

        let received = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            response: Arc::from(body.into()),
            received: Arc::clone(&received),
        };

        let router = Router::new()
            .route("/{version}/send/{widget_key}", post(receive_push))
            .with_state(state);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        runtime.spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
            runtime: Some(runtime),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Configuration pointing at this server
    pub fn config(&self, api_key: &str) -> Configuration {
        Configuration::builder(api_key)
            .base_url(self.base_url())
            .build()
    }

    /// Client for `widget_key` pointing at this server
    pub fn client(&self, widget_key: &str, api_key: &str) -> crate::Result<PushClient> {
        PushClient::with_config(widget_key, Arc::new(self.config(api_key)))
    }

    /// Pushes received so far, in arrival order
    pub fn received(&self) -> Vec<ReceivedPush> {
        self.received.lock().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

async fn receive_push(
    State(state): State<ServerState>,
    Path((api_version, widget_key)): Path<(String, String)>,
    body: String,
) -> impl IntoResponse {
    let body = serde_json::from_str(&body).unwrap_or(Value::String(body));
    state.received.lock().push(ReceivedPush {
        api_version,
        widget_key,
        body,
    });

    (
        [(header::CONTENT_TYPE, "application/json")],
        state.response.to_string(),
    )
}
