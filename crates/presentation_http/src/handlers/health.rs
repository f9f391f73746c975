//! Health check handlers

use application::GeneratorHealth;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub ready: bool,
    pub ai: GeneratorHealth,
    pub geocoder: &'static str,
    pub poi_catalog: bool,
    pub image_lookup: bool,
}

/// Readiness check
///
/// Always 200: every backend has a fallback, so the report only says which
/// ones are live.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let pipeline = state.trip_service.pipeline();
    let enricher = pipeline.enricher();

    Json(ReadinessResponse {
        ready: true,
        ai: pipeline.generator().health().await,
        geocoder: enricher.geocoder_name(),
        poi_catalog: enricher.has_poi_catalog(),
        image_lookup: enricher.has_image_lookup(),
    })
}
