//! Router assembly and serving

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::cors::cors_layer;
use crate::handlers::{status, workspace, AppState};

/// Build the application router over shared state.
///
/// Routes:
/// - `GET /` — the workspace page
/// - `POST /api/workspace` — run one submission
/// - `GET /health`, `GET /status` — probes and metrics
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(workspace::index_handler))
        .route("/api/workspace", post(workspace::workspace_handler))
        .route("/health", get(status::health_handler))
        .route("/status", get(status::status_handler))
        .layer(cors_layer())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> crate::error::Result<()> {
    let app = app_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "workspace builder listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::{AutomationBackend, RetrievedItem, SessionHandle, StepResponse};
    use crate::builder::{BuilderConfig, WorkspaceBuilder};
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

    #[test]
    fn test_router_builds() {
        let builder = WorkspaceBuilder::new(Arc::new(NullBackend), BuilderConfig::default());
        let state = Arc::new(AppState::new(builder));
        let _router = app_router(state);
    }
}
