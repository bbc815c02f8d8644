//! Transport layer for push requests
//!
//! [`HttpTransport`] performs the real blocking POST. The [`Transport`] trait
//! lets callers (and tests) substitute another implementation.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Result;

/// Sends a JSON body and returns the raw response body text
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `url`
    ///
    /// Network and HTTP-layer failures are returned unmodified as
    /// [`PushError::Transport`](crate::PushError::Transport). The response
    /// status is not interpreted here.
    fn post_json(&self, url: &Url, body: &Value) -> Result<String>;
}

/// Blocking HTTP transport backed by reqwest
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with no request timeout
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &Url, body: &Value) -> Result<String> {
        let response = self.client.post(url.clone()).json(body).send()?;
        debug!(status = %response.status(), "push response received");
        Ok(response.text()?)
    }
}
