use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub ollama_status: &'static str,
    pub model: String,
}

/// GET /health
/// Pings the inference endpoint on every call. Always 200; connectivity is reported, not raised.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    let limit = state.config.health_timeout;
    let (status, ollama_status) = match tokio::time::timeout(limit, state.llm.ping()).await {
        Ok(Ok(())) => ("healthy", "connected"),
        Ok(Err(e)) => {
            warn!("Inference endpoint health check failed: {e}");
            ("degraded", "disconnected")
        }
        Err(_) => {
            warn!("Inference endpoint health check exceeded {limit:?}");
            ("degraded", "disconnected")
        }
    };

    Json(HealthStatus {
        status,
        ollama_status,
        model: state.llm.model().to_string(),
    })
}
