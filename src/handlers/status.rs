//! Health and status endpoints
//!
//! - `GET /health` — liveness probe for process supervisors
//! - `GET /status` — uptime, submission counters, latency percentiles,
//!   and process memory

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hdrhistogram::Histogram;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::{debug, instrument};

use super::AppState;

/// Server version from Cargo.toml
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name from Cargo.toml
pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");

/// Health check response for liveness probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" if the process is responding
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Detailed server status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server version
    pub version: String,
    /// Server name
    pub name: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Submissions run since startup
    pub submissions_processed: u64,
    /// Result links collected across all submissions
    pub links_collected: u64,
    /// Failed submissions
    pub error_count: u64,
    /// Whether a submission is in flight right now
    pub busy: bool,
    /// Process memory metrics
    pub memory: MemoryMetrics,
    /// Submission latency percentiles
    pub latency: LatencyMetrics,
    /// ISO8601 timestamp of when status was generated
    pub timestamp: String,
}

/// Process memory usage from sysinfo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryMetrics {
    /// Resident set size in bytes
    pub rss_bytes: u64,
    /// Virtual memory size in bytes
    pub virtual_bytes: u64,
}

/// Submission latency percentiles in milliseconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatencyMetrics {
    /// Median latency
    pub p50_ms: f64,
    /// 95th percentile latency
    pub p95_ms: f64,
    /// 99th percentile latency
    pub p99_ms: f64,
    /// Number of submissions measured
    pub total: u64,
    /// Mean latency
    pub mean_ms: f64,
    /// Maximum latency recorded
    pub max_ms: f64,
}

/// Thread-safe latency histogram.
///
/// Tracks 1us to 60s with 3 significant figures via HdrHistogram.
#[derive(Debug)]
pub struct LatencyHistogram {
    inner: RwLock<Histogram<u64>>,
}

impl LatencyHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        let histogram =
            Histogram::new_with_bounds(1, 60_000_000, 3).expect("Failed to create histogram");
        Self {
            inner: RwLock::new(histogram),
        }
    }

    /// Record a latency in microseconds. Out-of-bounds values are
    /// dropped.
    pub fn record(&self, latency_us: u64) {
        let mut hist = self.inner.write();
        let _ = hist.record(latency_us);
    }

    /// Record a duration.
    pub fn record_duration(&self, duration: std::time::Duration) {
        self.record(duration.as_micros() as u64);
    }

    /// Number of recorded values.
    pub fn count(&self) -> u64 {
        self.inner.read().len()
    }

    /// Percentile snapshot in milliseconds.
    pub fn metrics(&self) -> LatencyMetrics {
        let hist = self.inner.read();
        LatencyMetrics {
            p50_ms: hist.value_at_percentile(50.0) as f64 / 1000.0,
            p95_ms: hist.value_at_percentile(95.0) as f64 / 1000.0,
            p99_ms: hist.value_at_percentile(99.0) as f64 / 1000.0,
            total: hist.len(),
            mean_ms: hist.mean() / 1000.0,
            max_ms: hist.max() as f64 / 1000.0,
        }
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect memory metrics for the current process.
fn collect_memory_metrics() -> MemoryMetrics {
    let pid = Pid::from_u32(std::process::id());
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    match system.process(pid) {
        Some(process) => MemoryMetrics {
            rss_bytes: process.memory(),
            virtual_bytes: process.virtual_memory(),
        },
        None => {
            debug!("Could not find current process in sysinfo");
            MemoryMetrics::default()
        }
    }
}

/// `GET /health`
#[instrument(skip_all)]
pub async fn health_handler() -> impl IntoResponse {
    debug!("Health check requested");
    (StatusCode::OK, Json(HealthResponse::default()))
}

/// `GET /status`
#[instrument(skip_all)]
pub async fn status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Status check requested");

    let response = StatusResponse {
        version: SERVER_VERSION.to_string(),
        name: SERVER_NAME.to_string(),
        uptime_seconds: state.uptime_seconds(),
        submissions_processed: state.submissions_processed(),
        links_collected: state.links_collected(),
        error_count: state.error_count(),
        busy: state.is_busy(),
        memory: collect_memory_metrics(),
        latency: state.latency_metrics(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}
