//! Remote automation API client
//!
//! The automation service owns the hard parts: browser control, DOM
//! extraction, search ranking. This module is the thin session-oriented
//! client for it, behind the [`AutomationBackend`] trait so the
//! submission handler can be tested against a fake.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::types::{
    CreateSessionRequest, RetrieveRequest, RetrieveResponse, RetrievedItem, SessionHandle,
    StepRequest, StepResponse,
};
use crate::error::{AutomationError, Result};

/// Environment variable holding the automation API credential
pub const API_KEY_ENV: &str = "WORKSPACE_BUILDER_API_KEY";

/// Default request timeout for automation calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The capability set the submission handler depends on.
///
/// Mirrors the remote service's surface: create a browsing session,
/// drive it with natural-language steps, optionally do a one-shot
/// structured retrieval, and tear the session down. Tests substitute a
/// fake implementation; production uses [`HttpAutomationClient`].
#[async_trait]
pub trait AutomationBackend: Send + Sync {
    /// Open a remote browsing session anchored at `start_url`.
    async fn create_session(&self, start_url: &str) -> Result<SessionHandle>;

    /// Issue a natural-language step instruction to a session.
    async fn step(&self, session_id: &str, instruction: &str) -> Result<StepResponse>;

    /// One-shot structured extraction with named fields.
    async fn retrieve(
        &self,
        instruction: &str,
        start_url: &str,
        fields: &[&str],
    ) -> Result<Vec<RetrievedItem>>;

    /// Close a session. Best-effort: callers log and swallow failures.
    async fn close_session(&self, session_id: &str) -> Result<()>;
}

/// Configuration for the HTTP automation client
#[derive(Debug, Clone)]
pub struct AutomationConfig {
    /// Base URL of the automation API
    pub base_url: String,
    /// Bearer credential, if configured
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl AutomationConfig {
    /// Build a config for `base_url`, reading the credential from the
    /// process environment. Presence (never the value) is logged so a
    /// missing key shows up in diagnostics before the first request
    /// fails.
    pub fn from_env(base_url: &str) -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        tracing::info!(
            credential = if api_key.is_some() { "set" } else { "not set" },
            "automation API credential"
        );
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// `reqwest`-backed implementation of [`AutomationBackend`]
pub struct HttpAutomationClient {
    client: reqwest::Client,
    config: AutomationConfig,
}

impl HttpAutomationClient {
    /// Create a client from a config.
    pub fn new(config: AutomationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let endpoint = format!("{}{}", self.config.base_url, path);
        let mut req = self.client.post(&endpoint).json(body);
        if let Some(ref key) = self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AutomationError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let parsed = resp.json::<T>().await?;
        Ok(parsed)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let endpoint = format!("{}{}", self.config.base_url, path);
        let mut req = self.client.delete(&endpoint);
        if let Some(ref key) = self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AutomationError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl AutomationBackend for HttpAutomationClient {
    #[instrument(skip(self))]
    async fn create_session(&self, start_url: &str) -> Result<SessionHandle> {
        let body = CreateSessionRequest {
            url: start_url.to_string(),
        };
        let handle: SessionHandle = self.post_json("/sessions", &body).await?;
        debug!(session_id = %handle.session_id, "session created");
        Ok(handle)
    }

    #[instrument(skip(self, instruction))]
    async fn step(&self, session_id: &str, instruction: &str) -> Result<StepResponse> {
        let body = StepRequest {
            cmd: instruction.to_string(),
        };
        let path = format!("/sessions/{session_id}/step");
        let resp: StepResponse = self.post_json(&path, &body).await?;
        debug!(
            session_id,
            url = resp.url.as_deref().unwrap_or("-"),
            "step completed"
        );
        Ok(resp)
    }

    #[instrument(skip(self, instruction))]
    async fn retrieve(
        &self,
        instruction: &str,
        start_url: &str,
        fields: &[&str],
    ) -> Result<Vec<RetrievedItem>> {
        let body = RetrieveRequest {
            cmd: instruction.to_string(),
            url: start_url.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        };
        let resp: RetrieveResponse = self.post_json("/retrieve", &body).await?;
        debug!(items = resp.data.len(), "retrieve completed");
        Ok(resp.data)
    }

    #[instrument(skip(self))]
    async fn close_session(&self, session_id: &str) -> Result<()> {
        let path = format!("/sessions/{session_id}");
        self.delete(&path).await?;
        debug!(session_id, "session closed");
        Ok(())
    }
}
