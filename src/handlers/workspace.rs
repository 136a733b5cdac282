//! Workspace page and submission endpoint
//!
//! - `GET /` — the single page: topic input, submit button, link list
//! - `POST /api/workspace` — run one submission and return the links
//!
//! Every failure mode of a submission collapses to an empty link list
//! with detail only in the logs; the page never sees error text. While
//! a submission is in flight the slot is held and a concurrent request
//! is refused with 429.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use super::AppState;
use crate::extraction::{shorten_url, ResultLink};

/// Submission request body
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceRequest {
    /// Topic to build a workspace around
    pub query: String,
}

/// One rendered link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkView {
    /// Display label
    pub label: String,
    /// Full link target
    pub url: String,
    /// Shortened display text (host + truncated path)
    pub display: String,
}

impl From<ResultLink> for LinkView {
    fn from(link: ResultLink) -> Self {
        let display = shorten_url(&link.url);
        Self {
            label: link.label,
            url: link.url,
            display,
        }
    }
}

/// Submission response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceResponse {
    /// The submitted query, trimmed
    pub query: String,
    /// Collected links, in response order
    pub links: Vec<LinkView>,
}

/// `GET /` — serve the page.
pub async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// `POST /api/workspace` — run one submission.
///
/// Returns 200 with the link list (possibly empty) or 429 when another
/// submission is already in flight.
#[instrument(skip(state, req), fields(query = %req.query))]
pub async fn workspace_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WorkspaceRequest>,
) -> impl IntoResponse {
    let Some(_guard) = state.try_begin_submission() else {
        info!("submission refused: another is in flight");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(WorkspaceResponse {
                query: req.query.trim().to_string(),
                links: Vec::new(),
            }),
        );
    };

    let started = Instant::now();
    let query = req.query.trim().to_string();

    let links = match state.builder.build(&query).await {
        Ok(links) => {
            state.record_submission(links.len());
            links
        }
        Err(e) => {
            // All failures look the same to the page: no links.
            error!(error = %e, "submission failed");
            state.record_error();
            Vec::new()
        }
    };
    state.record_latency(started.elapsed());

    (
        StatusCode::OK,
        Json(WorkspaceResponse {
            query,
            links: links.into_iter().map(LinkView::from).collect(),
        }),
    )
}

/// The single page. Static markup plus just enough script to post the
/// query, disable the submit control while loading, and render the
/// returned links in new tabs.
const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Workspace Builder</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 42rem; margin: 4rem auto; padding: 0 1rem; }
    h1 { font-size: 1.8rem; }
    input[type=text] { width: 100%; padding: .5rem; font-size: 1rem; box-sizing: border-box; }
    button { margin-top: .5rem; padding: .5rem 1rem; font-size: 1rem; }
    button:disabled { opacity: .6; }
    ul { list-style: none; padding: 0; }
    li { margin: .5rem 0; padding: .75rem; border: 1px solid #ddd; border-radius: .5rem; }
    .submitted { color: #555; margin-top: .5rem; }
  </style>
</head>
<body>
  <h1>Workspace Builder</h1>
  <p>You want to build a workspace around what topic?</p>
  <input type="text" id="topic" placeholder="Enter your text here">
  <button id="submit">Submit</button>
  <p class="submitted" id="submitted" hidden></p>
  <div id="results" hidden>
    <h2>Relevant Links:</h2>
    <ul id="links"></ul>
  </div>
  <script>
    const input = document.getElementById('topic');
    const button = document.getElementById('submit');
    const submitted = document.getElementById('submitted');
    const results = document.getElementById('results');
    const list = document.getElementById('links');

    button.addEventListener('click', async () => {
      const query = input.value.trim();
      if (!query) return;

      submitted.textContent = 'Submitted text: ' + query;
      submitted.hidden = false;
      input.value = '';
      button.disabled = true;
      button.textContent = 'Loading...';

      try {
        const resp = await fetch('/api/workspace', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ query }),
        });
        const data = await resp.json();
        list.textContent = '';
        for (const link of data.links) {
          const li = document.createElement('li');
          const a = document.createElement('a');
          a.href = link.url;
          a.target = '_blank';
          a.rel = 'noopener noreferrer';
          a.textContent = link.display;
          li.appendChild(a);
          list.appendChild(li);
        }
        results.hidden = data.links.length === 0;
      } catch (err) {
        console.error('submission failed', err);
        results.hidden = true;
      } finally {
        button.disabled = false;
        button.textContent = 'Submit';
      }
    });
  </script>
</body>
</html>
"#;
