//! Trip handlers
//!
//! Generation, saving, refreshing and public listing of enriched trips.

use application::TripFilter;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use domain::{BudgetTier, EnrichedTrip, Mood, Preference, TripId, TripRequest};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Body of `POST /api/trips/generate`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTripRequest {
    pub mood: Mood,

    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub location: String,

    #[validate(range(min = 1, max = 24, message = "must be 1-24 hours"))]
    pub duration_hours: u8,

    #[validate(range(max = 4, message = "must be 0-4"))]
    #[serde(default)]
    pub budget_tier: u8,

    #[serde(default)]
    pub preferences: Vec<Preference>,

    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

impl GenerateTripRequest {
    /// Build the domain request; the domain re-checks every limit
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` for a blank location or other invalid field.
    pub fn into_trip_request(self) -> Result<TripRequest, ApiError> {
        let tier =
            BudgetTier::new(self.budget_tier).map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let request = TripRequest::new(self.mood, self.location, self.duration_hours, tier)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?
            .with_preferences(self.preferences.into_iter().collect());

        match self.custom_prompt {
            Some(prompt) => request
                .with_custom_prompt(prompt)
                .map_err(|e| ApiError::BadRequest(e.to_string())),
            None => Ok(request),
        }
    }
}

/// Response of `POST /api/trips`
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedTripResponse {
    pub id: TripId,
    pub message: String,
}

/// Query for `GET /api/trips`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

/// Query for `GET /api/trips/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub mood: Option<Mood>,
    pub location: Option<String>,
    pub limit: Option<u32>,
}

impl SearchQuery {
    fn filter(&self) -> TripFilter {
        TripFilter {
            mood: self.mood,
            location: self.location.clone(),
        }
    }
}

/// Generate, enrich and save a trip
#[instrument(skip(state, body), fields(mood = %body.mood, location = %body.location))]
pub async fn generate_trip(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<GenerateTripRequest>,
) -> Result<(StatusCode, Json<EnrichedTrip>), ApiError> {
    let request = body.into_trip_request()?;
    let trip = state.trip_service.generate_trip(&request).await?;
    info!(trip_id = %trip.id, source = ?trip.source, "Trip generated");
    Ok((StatusCode::CREATED, Json(trip)))
}

/// Save a client-supplied trip
#[instrument(skip(state, trip), fields(trip_id = %trip.id))]
pub async fn save_trip(
    State(state): State<AppState>,
    Json(trip): Json<EnrichedTrip>,
) -> Result<(StatusCode, Json<SavedTripResponse>), ApiError> {
    let id = state.trip_service.save_trip(&trip).await?;
    Ok((
        StatusCode::CREATED,
        Json(SavedTripResponse {
            id,
            message: "Trip saved successfully".to_string(),
        }),
    ))
}

/// Fetch one trip, counting the view
#[instrument(skip(state))]
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EnrichedTrip>, ApiError> {
    let id = TripId::parse(&id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid trip id: {id}")))?;
    let trip = state.trip_service.get_trip(&id).await?;
    Ok(Json(trip))
}

/// Re-run enrichment over a stored trip
#[instrument(skip(state))]
pub async fn refresh_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EnrichedTrip>, ApiError> {
    let id = TripId::parse(&id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid trip id: {id}")))?;
    let trip = state.trip_service.refresh_trip(&id).await?;
    Ok(Json(trip))
}

/// Public trips, newest first
#[instrument(skip(state))]
pub async fn list_trips(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EnrichedTrip>>, ApiError> {
    let trips = state.trip_service.list_public_trips(query.limit).await?;
    Ok(Json(trips))
}

/// Public trips matching `q`, optionally narrowed by mood and location
#[instrument(skip(state))]
pub async fn search_trips(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<EnrichedTrip>>, ApiError> {
    let trips = state
        .trip_service
        .search_public_trips(&query.q, &query.filter(), query.limit)
        .await?;
    Ok(Json(trips))
}
