//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use tabshare_core::vision::VisionBackend;

/// Service health report, including the vision backend when configured.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub vision: VisionStatus,
}

#[derive(Debug, Serialize)]
pub struct VisionStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// GET /api/health - Service and vision backend status
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let vision = match &state.vision {
        Some(client) => VisionStatus {
            configured: true,
            healthy: Some(client.health_check().await),
            host: Some(client.host().to_string()),
            model: Some(client.model().to_string()),
        },
        None => VisionStatus {
            configured: false,
            healthy: None,
            host: None,
            model: None,
        },
    };

    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        vision,
    })
}
