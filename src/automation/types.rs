//! Wire types for the remote automation API
//!
//! The service speaks loosely structured JSON: every field the caller
//! cares about is optional and pattern-matched, not validated against a
//! versioned schema. Unknown fields are ignored on the way in and
//! omitted on the way out.

use serde::{Deserialize, Serialize};

/// Handle to a remote browsing session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHandle {
    /// Opaque server-side session identifier; the service has shipped
    /// both snake_case and camelCase spellings
    #[serde(alias = "sessionId")]
    pub session_id: String,
    /// URL of the page the session currently shows, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Response to a natural-language step instruction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepResponse {
    /// Free-text message from the agent, often newline-delimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// URL of the page the session landed on after the step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Service-reported step status ("DONE", "CONTINUE", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// One item returned by a structured retrieve call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievedItem {
    /// Title field, when the service filled it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// URL field, when the service filled it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Body for session creation
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest {
    /// Page the session opens on
    pub url: String,
}

/// Body for a step instruction
#[derive(Debug, Clone, Serialize)]
pub struct StepRequest {
    /// Natural-language command for the remote agent
    pub cmd: String,
}

/// Body for a structured retrieve call
#[derive(Debug, Clone, Serialize)]
pub struct RetrieveRequest {
    /// Natural-language extraction instruction
    pub cmd: String,
    /// Page to anchor the retrieval on
    pub url: String,
    /// Field names the caller wants populated on each item
    pub fields: Vec<String>,
}

/// Envelope for retrieve responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveResponse {
    /// Extracted items; missing field decodes as empty
    #[serde(default)]
    pub data: Vec<RetrievedItem>,
}
