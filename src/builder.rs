//! Submission handling
//!
//! [`WorkspaceBuilder`] turns one topic query into a list of result
//! links by driving the remote automation service: open a session on
//! the search engine, issue a search step, then ask for the top ranked
//! results one at a time. The session is closed on every path.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::automation::{AutomationBackend, SessionHandle};
use crate::error::Result;
use crate::extraction::{first_url_from_text, is_on_domain, ResultLink};

/// Configuration for the submission handler
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Page the remote session opens on
    pub start_url: String,
    /// Domain of the search engine; its own pages never qualify as
    /// results
    pub search_domain: String,
    /// How many ranked results to ask for
    pub result_count: usize,
    /// Pause between ranked extraction steps. Accommodates remote
    /// latency, not required for correctness.
    pub step_delay: Duration,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            start_url: "https://www.google.com".to_string(),
            search_domain: "google.com".to_string(),
            result_count: 5,
            step_delay: Duration::from_secs(1),
        }
    }
}

impl BuilderConfig {
    /// Create a config builder
    pub fn builder() -> BuilderConfigBuilder {
        BuilderConfigBuilder::default()
    }
}

/// Builder for [`BuilderConfig`]
#[derive(Default)]
pub struct BuilderConfigBuilder {
    config: BuilderConfig,
}

impl BuilderConfigBuilder {
    /// Set the session start page
    pub fn start_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.start_url = url.into();
        self
    }

    /// Set the excluded search engine domain
    pub fn search_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.config.search_domain = domain.into();
        self
    }

    /// Set how many ranked results to request
    pub fn result_count(mut self, count: usize) -> Self {
        self.config.result_count = count;
        self
    }

    /// Set the inter-step pause
    pub fn step_delay(mut self, delay: Duration) -> Self {
        self.config.step_delay = delay;
        self
    }

    /// Build the config
    pub fn build(self) -> BuilderConfig {
        self.config
    }
}

/// Runs one submission against the remote automation service.
pub struct WorkspaceBuilder {
    backend: Arc<dyn AutomationBackend>,
    config: BuilderConfig,
}

impl WorkspaceBuilder {
    /// Create a handler over the given backend.
    pub fn new(backend: Arc<dyn AutomationBackend>, config: BuilderConfig) -> Self {
        Self { backend, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Produce result links for one query.
    ///
    /// An empty-after-trim query is a no-op: no session is created and
    /// an empty list comes back. Otherwise a session is opened, the
    /// steps run, and the session is closed whether the steps succeeded
    /// or not. A failing step ends the submission; responses that
    /// merely lack a qualifying URL are skipped.
    #[instrument(skip(self), fields(submission = %Uuid::new_v4()))]
    pub async fn build(&self, query: &str) -> Result<Vec<ResultLink>> {
        let query = query.trim();
        if query.is_empty() {
            debug!("empty query, skipping submission");
            return Ok(Vec::new());
        }

        info!(query, "starting submission");
        let session = self.backend.create_session(&self.config.start_url).await?;

        let outcome = self.run_steps(&session, query).await;

        // Best-effort teardown on success and failure alike.
        if let Err(e) = self.backend.close_session(&session.session_id).await {
            warn!(session_id = %session.session_id, error = %e, "failed to close session");
        }

        let links = outcome?;
        info!(count = links.len(), "submission finished");
        Ok(links)
    }

    async fn run_steps(&self, session: &SessionHandle, query: &str) -> Result<Vec<ResultLink>> {
        let search_cmd = format!(
            "Search for \"{query}\" and open the search results page."
        );
        let search = self.backend.step(&session.session_id, &search_cmd).await?;

        let mut links = Vec::new();

        let on_results_page = search
            .url
            .as_deref()
            .is_some_and(|u| is_on_domain(u, &self.config.search_domain));
        if !on_results_page {
            debug!(
                url = search.url.as_deref().unwrap_or("-"),
                "search step did not land on the results page"
            );
            return Ok(links);
        }

        for rank in 1..=self.config.result_count {
            tokio::time::sleep(self.config.step_delay).await;

            let cmd = format!(
                "Find and return the URL of the {} relevant website about \"{query}\" \
                 from the search results.",
                ordinal(rank)
            );
            let resp = self.backend.step(&session.session_id, &cmd).await?;

            match self.qualifying_url(resp.url.as_deref(), resp.message.as_deref()) {
                Some(url) => {
                    links.push(ResultLink {
                        label: ResultLink::fallback_label(links.len() + 1),
                        url,
                    });
                }
                None => {
                    debug!(rank, "no qualifying URL for ranked result");
                }
            }
        }

        Ok(links)
    }

    /// Prefer the structured `url` field; fall back to scanning the
    /// free-text message for the first absolute URL off the search
    /// engine's domain.
    fn qualifying_url(&self, url: Option<&str>, message: Option<&str>) -> Option<String> {
        if let Some(url) = url {
            if crate::extraction::is_absolute_url(url)
                && !is_on_domain(url, &self.config.search_domain)
            {
                return Some(url.to_string());
            }
        }
        message.and_then(|text| first_url_from_text(text, &self.config.search_domain))
    }
}

/// English ordinal suffix form for small ranks (1st, 2nd, 3rd, 4th...).
fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
