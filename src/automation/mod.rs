//! Remote automation service integration
//!
//! A session-oriented client for the third-party browser-automation
//! API. The service is opaque and unmodifiable from this codebase; this
//! module only knows how to open a session, send instructions, and tear
//! the session down again.

pub mod client;
pub mod types;

pub use client::{
    AutomationBackend, AutomationConfig, HttpAutomationClient, API_KEY_ENV, DEFAULT_TIMEOUT_SECS,
};
pub use types::{RetrievedItem, SessionHandle, StepResponse};
