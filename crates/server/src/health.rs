use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use frontdesk_core::{AssistantProviderClient, ListOptions};
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    assistant: Arc<dyn AssistantProviderClient>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub assistant_provider: HealthCheck,
    pub checked_at: String,
}

pub fn router(assistant: Arc<dyn AssistantProviderClient>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { assistant })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let assistant_provider = provider_check(state.assistant.as_ref()).await;
    let ready = assistant_provider.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "frontdesk-server runtime initialized".to_string(),
        },
        assistant_provider,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn provider_check(assistant: &dyn AssistantProviderClient) -> HealthCheck {
    match assistant.list(ListOptions { limit: Some(1) }).await {
        Ok(_) => {
            HealthCheck { status: "ready", detail: "assistant provider responded".to_string() }
        }
        Err(error) => HealthCheck {
            status: "degraded",
            detail: format!("assistant provider check failed: {error}"),
        },
    }
}
