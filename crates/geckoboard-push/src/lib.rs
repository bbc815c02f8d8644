//! Geckoboard Push Client
//!
//! Pushes live data to dashboard widgets through the push API. Each widget
//! type has a typed request that is encoded into the payload shape the
//! service expects.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use geckoboard_push::{Configuration, PushClient, Severity, TextItem};
//!
//! fn main() -> geckoboard_push::Result<()> {
//!     let config = Arc::new(Configuration::new("your-api-key"));
//!     let client = PushClient::with_config("widget-key", config)?;
//!
//!     client.geckometer(72.0, 0.0, 100.0)?;
//!     client.text(vec![TextItem::new("Deploy failed", Severity::Alert)])?;
//!     client.rag([3.0, 5.0, 12.0], ["Late", "At risk", "On time"])?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Process-wide configuration
//!
//! A configuration may instead be installed once at startup, after which
//! [`PushClient::new`] picks it up:
//!
//! ```rust,no_run
//! use geckoboard_push::{Configuration, PushClient};
//!
//! # fn main() -> anyhow::Result<()> {
//! Configuration::from_yaml_file("push.yaml")?.install()?;
//! PushClient::new("widget-key")?.geckometer(5.0, 0.0, 10.0)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides a local stand-in for the push service:
//!
//! ```rust,ignore
//! use geckoboard_push::testing::TestServer;
//!
//! let server = TestServer::start()?;
//! server.client("widget", "secret")?.geckometer(5.0, 0.0, 10.0)?;
//! assert_eq!(server.received().len(), 1);
//! ```

pub mod chart;
mod client;
mod config;
pub mod encode;
mod error;
pub mod template;
pub mod testing;
pub mod transport;
mod widget;

pub use client::PushClient;
pub use config::{
    ConfigError, Configuration, ConfigurationBuilder, DEFAULT_API_VERSION, DEFAULT_BASE_URL,
};
pub use error::{ErrorKind, PushError, Result, API_KEY_NOT_CONFIGURED};
pub use transport::{HttpTransport, Transport};
pub use widget::*;
