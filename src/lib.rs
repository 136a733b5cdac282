//! Workspace Builder - Topic Link Collection over a Remote Automation Service
//!
//! This crate serves a single-page "workspace builder": the user enters
//! a topic, the service drives a third-party session-oriented
//! browser-automation API to find the top relevant pages, and the
//! extracted links render as a clickable list.
//!
//! # Architecture
//!
//! ```text
//! Browser ──▶ Axum handlers ──▶ WorkspaceBuilder ──▶ AutomationBackend
//!   page         │                    │                  (remote API)
//!                ▼                    ▼
//!          busy guard +        link extraction
//!          status metrics      (absolute URLs, domain filter)
//! ```
//!
//! The remote service is opaque: session lifecycle, navigation, and
//! extraction intelligence all live on its side. Everything here is
//! orchestration, a narrow parsing adapter, and the presentation layer.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workspace_builder::automation::{AutomationConfig, HttpAutomationClient};
//! use workspace_builder::builder::{BuilderConfig, WorkspaceBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpAutomationClient::new(AutomationConfig::from_env(
//!         "https://api.automation.example",
//!     ))?;
//!     let builder = WorkspaceBuilder::new(Arc::new(client), BuilderConfig::default());
//!
//!     let links = builder.build("vintage synthesizers").await?;
//!     for link in links {
//!         println!("{}: {}", link.label, link.url);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod automation;
pub mod builder;
pub mod cors;
pub mod error;
pub mod extraction;
pub mod handlers;
pub mod server;

// Re-exports for convenience
pub use automation::{AutomationBackend, HttpAutomationClient};
pub use builder::{BuilderConfig, WorkspaceBuilder};
pub use error::{Error, Result};
pub use extraction::ResultLink;
pub use handlers::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
