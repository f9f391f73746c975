//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_json_bytes;

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Trips
        .route(
            "/api/trips",
            get(handlers::trips::list_trips).post(handlers::trips::save_trip),
        )
        .route("/api/trips/generate", post(handlers::trips::generate_trip))
        .route("/api/trips/search", get(handlers::trips::search_trips))
        .route("/api/trips/{id}", get(handlers::trips::get_trip))
        .route(
            "/api/trips/{id}/refresh",
            post(handlers::trips::refresh_trip),
        )
        // Geodata
        .route("/api/geocode", get(handlers::geo::geocode))
        .route("/api/geocode/reverse", get(handlers::geo::reverse_geocode))
        .route(
            "/api/places/autocomplete",
            get(handlers::geo::autocomplete),
        )
        .route("/api/places/nearby", get(handlers::geo::nearby_places))
        .route("/api/places/{id}", get(handlers::geo::place_details))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
