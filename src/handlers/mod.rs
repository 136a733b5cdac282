//! HTTP handlers for the workspace builder service
//!
//! - `workspace` — the served page and the submission endpoint
//! - `status` — health and status endpoints with runtime metrics

pub mod status;
pub mod workspace;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::builder::WorkspaceBuilder;
use status::LatencyHistogram;

/// Shared application state.
///
/// Holds the submission handler, the single-flight guard, and the
/// counters the status endpoint reports. All fields are safe for
/// concurrent access.
pub struct AppState {
    /// Runs submissions against the remote automation service
    pub builder: WorkspaceBuilder,

    /// True while a submission is in flight. At most one submission
    /// runs at a time; a concurrent request is refused, not queued.
    busy: AtomicBool,

    start_time: Instant,
    submissions_processed: AtomicU64,
    links_collected: AtomicU64,
    error_count: AtomicU64,
    latency_histogram: LatencyHistogram,
}

impl AppState {
    /// Create state around a submission handler.
    pub fn new(builder: WorkspaceBuilder) -> Self {
        Self {
            builder,
            busy: AtomicBool::new(false),
            start_time: Instant::now(),
            submissions_processed: AtomicU64::new(0),
            links_collected: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            latency_histogram: LatencyHistogram::new(),
        }
    }

    /// Try to claim the single submission slot.
    ///
    /// Returns a guard that releases the slot on drop, or `None` when a
    /// submission is already in flight. The drop-based release is what
    /// guarantees the busy flag clears on every exit path.
    pub fn try_begin_submission(self: &Arc<Self>) -> Option<BusyGuard> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(BusyGuard {
                state: Arc::clone(self),
            })
        } else {
            None
        }
    }

    /// Whether a submission is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Record a finished submission and the links it produced.
    pub fn record_submission(&self, links: usize) {
        self.submissions_processed.fetch_add(1, Ordering::Relaxed);
        self.links_collected
            .fetch_add(links as u64, Ordering::Relaxed);
    }

    /// Record a failed submission.
    pub fn record_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record submission latency.
    pub fn record_latency(&self, duration: std::time::Duration) {
        self.latency_histogram.record_duration(duration);
    }

    /// Total submissions processed.
    pub fn submissions_processed(&self) -> u64 {
        self.submissions_processed.load(Ordering::Relaxed)
    }

    /// Total links collected across submissions.
    pub fn links_collected(&self) -> u64 {
        self.links_collected.load(Ordering::Relaxed)
    }

    /// Total failed submissions.
    pub fn error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Latency percentile metrics.
    pub fn latency_metrics(&self) -> status::LatencyMetrics {
        self.latency_histogram.metrics()
    }
}

/// RAII guard for the single submission slot.
///
/// Dropping the guard releases the slot, so success, failure, and early
/// returns all clear the busy flag.
pub struct BusyGuard {
    state: Arc<AppState>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.state.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::{AutomationBackend, RetrievedItem, SessionHandle, StepResponse};
    use crate::builder::BuilderConfig;
    use crate::error::Result;
    use async_trait::async_trait;

    struct NullBackend;

    #[async_trait]
    impl AutomationBackend for NullBackend {
        async fn create_session(&self, _start_url: &str) -> Result<SessionHandle> {
            Ok(SessionHandle {
                session_id: "s".to_string(),
                url: None,
            })
        }
        async fn step(&self, _session_id: &str, _instruction: &str) -> Result<StepResponse> {
            Ok(StepResponse::default())
        }
        async fn retrieve(
            &self,
            _instruction: &str,
            _start_url: &str,
            _fields: &[&str],
        ) -> Result<Vec<RetrievedItem>> {
            Ok(Vec::new())
        }
        async fn close_session(&self, _session_id: &str) -> Result<()> {
            Ok(())
        }
    }

    fn test_state() -> Arc<AppState> {
        let builder = WorkspaceBuilder::new(Arc::new(NullBackend), BuilderConfig::default());
        Arc::new(AppState::new(builder))
    }

    #[test]
    fn test_busy_guard_single_flight() {
        let state = test_state();
        let guard = state.try_begin_submission();
        assert!(guard.is_some());
        assert!(state.is_busy());

        // Second claim while held is refused.
        assert!(state.try_begin_submission().is_none());

        drop(guard);
        assert!(!state.is_busy());
        assert!(state.try_begin_submission().is_some());
    }

    #[test]
    fn test_counters() {
        let state = test_state();
        state.record_submission(5);
        state.record_submission(0);
        state.record_error();

        assert_eq!(state.submissions_processed(), 2);
        assert_eq!(state.links_collected(), 5);
        assert_eq!(state.error_count(), 1);
    }

    #[test]
    fn test_uptime_starts_near_zero() {
        let state = test_state();
        assert!(state.uptime_seconds() < 2);
    }
}
