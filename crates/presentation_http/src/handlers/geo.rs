//! Geocoding, place-suggestion and point-of-interest handlers

use std::sync::Arc;

use application::{AddressSuggestion, GeocodedPlace, NearbyPlace, PoiCatalogPort};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use domain::GeoLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Shortest input that triggers suggestions
pub const MIN_AUTOCOMPLETE_CHARS: usize = 2;

const DEFAULT_SUGGESTIONS: usize = 5;
const MAX_SUGGESTIONS: usize = 10;

/// Accepted nearby-search radius, in meters
pub const NEARBY_RADIUS_M: std::ops::RangeInclusive<u32> = 100..=50_000;

const DEFAULT_NEARBY_RADIUS_M: u32 = 1000;
const DEFAULT_NEARBY_LIMIT: u32 = 20;
const MAX_NEARBY_LIMIT: u32 = 50;

/// Query for `GET /api/geocode`
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    pub address: String,
}

/// Forward geocoding result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResponse {
    pub lat: f64,
    pub lng: f64,
    pub formatted_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl From<GeocodedPlace> for GeocodeResponse {
    fn from(place: GeocodedPlace) -> Self {
        Self {
            lat: place.location.latitude(),
            lng: place.location.longitude(),
            formatted_address: place.formatted_address,
            external_id: place.external_id,
        }
    }
}

/// Query for `GET /api/geocode/reverse`
#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lng: f64,
}

/// Reverse geocoding result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseGeocodeResponse {
    pub formatted_address: String,
    /// True when the address is the coordinate string because lookup failed
    pub fallback: bool,
}

/// Query for `GET /api/places/autocomplete`
#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub input: String,
    pub limit: Option<usize>,
}

/// Query for `GET /api/places/nearby`
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    /// Category substring, e.g. "museum"
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub radius: Option<u32>,
    pub limit: Option<u32>,
}

/// A catalog entry near the requested point
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlaceResponse {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    pub types: Vec<String>,
}

impl From<NearbyPlace> for NearbyPlaceResponse {
    fn from(place: NearbyPlace) -> Self {
        Self {
            name: place.name,
            place_id: place.external_id,
            rating: place.rating,
            reviews: place.review_count,
            price_level: place.price_level,
            types: place.kinds,
        }
    }
}

/// Details known for one catalog entry
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailsResponse {
    pub place_id: String,
    pub opening_hours: Option<Vec<String>>,
}

fn poi_catalog(state: &AppState) -> Result<&Arc<dyn PoiCatalogPort>, ApiError> {
    state
        .poi_catalog
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("No place catalog configured".to_string()))
}

/// Coordinates rendered the way the fallback address is shown
fn coordinate_label(lat: f64, lng: f64) -> String {
    format!("{lat:.4}, {lng:.4}")
}

/// Resolve an address to coordinates
#[instrument(skip(state))]
pub async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let address = query.address.trim();
    if address.is_empty() {
        return Err(ApiError::BadRequest("address is required".to_string()));
    }

    let place = state.geocoder.geocode(address).await?;
    Ok(Json(place.into()))
}

/// Resolve coordinates to an address
///
/// Backend failures degrade to the coordinate string rather than an error.
#[instrument(skip(state))]
pub async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<ReverseQuery>,
) -> Result<Json<ReverseGeocodeResponse>, ApiError> {
    let location =
        GeoLocation::new(query.lat, query.lng).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let response = match state.geocoder.reverse_geocode(location).await {
        Ok(formatted_address) => ReverseGeocodeResponse {
            formatted_address,
            fallback: false,
        },
        Err(e) => {
            warn!(error = %e, provider = state.geocoder.provider_name(), "Reverse geocoding failed, using coordinates");
            ReverseGeocodeResponse {
                formatted_address: coordinate_label(query.lat, query.lng),
                fallback: true,
            }
        },
    };
    Ok(Json(response))
}

/// Suggest addresses for partial input
///
/// Short input and backend failures both yield an empty list.
#[instrument(skip(state))]
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(query): Query<AutocompleteQuery>,
) -> Json<Vec<AddressSuggestion>> {
    let input = query.input.trim();
    if input.chars().count() < MIN_AUTOCOMPLETE_CHARS {
        return Json(Vec::new());
    }

    let limit = query
        .limit
        .unwrap_or(DEFAULT_SUGGESTIONS)
        .clamp(1, MAX_SUGGESTIONS);

    match state.geocoder.autocomplete(input, limit).await {
        Ok(suggestions) => {
            debug!(count = suggestions.len(), "Suggestions found");
            Json(suggestions)
        },
        Err(e) => {
            warn!(error = %e, provider = state.geocoder.provider_name(), "Autocomplete failed");
            Json(Vec::new())
        },
    }
}

/// Catalog entries around a point, optionally narrowed to one category
#[instrument(skip(state))]
pub async fn nearby_places(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<NearbyPlaceResponse>>, ApiError> {
    let location =
        GeoLocation::new(query.lat, query.lng).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let radius = query.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_M);
    if !NEARBY_RADIUS_M.contains(&radius) {
        return Err(ApiError::BadRequest(format!(
            "radius must be between {} and {} meters",
            NEARBY_RADIUS_M.start(),
            NEARBY_RADIUS_M.end()
        )));
    }
    let limit = query
        .limit
        .unwrap_or(DEFAULT_NEARBY_LIMIT)
        .clamp(1, MAX_NEARBY_LIMIT);

    let catalog = poi_catalog(&state)?;
    let places = catalog.nearby(location, radius, limit).await?;
    let kind = query.kind.as_deref().map(str::trim).filter(|k| !k.is_empty());

    let places: Vec<NearbyPlaceResponse> = places
        .into_iter()
        .filter(|p| kind.is_none_or(|k| p.has_kind(k)))
        .map(NearbyPlaceResponse::from)
        .collect();
    debug!(count = places.len(), "Nearby places found");
    Ok(Json(places))
}

/// Opening hours for a catalog entry
#[instrument(skip(state))]
pub async fn place_details(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<PlaceDetailsResponse>, ApiError> {
    let place_id = place_id.trim().to_string();
    if place_id.is_empty() {
        return Err(ApiError::BadRequest("place id is required".to_string()));
    }

    let catalog = poi_catalog(&state)?;
    let opening_hours = catalog.opening_hours(&place_id).await?;
    Ok(Json(PlaceDetailsResponse {
        place_id,
        opening_hours,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_label_uses_four_decimals() {
        assert_eq!(coordinate_label(48.856_614, 2.352_222), "48.8566, 2.3522");
        assert_eq!(coordinate_label(-33.9, 151.0), "-33.9000, 151.0000");
    }

    #[test]
    fn nearby_response_uses_wire_names() {
        let place = NearbyPlace {
            name: "Louvre".to_string(),
            rating: Some(4.7),
            external_id: Some("W123".to_string()),
            kinds: vec!["museums".to_string()],
            ..NearbyPlace::default()
        };
        let json = serde_json::to_value(NearbyPlaceResponse::from(place)).unwrap();
        assert_eq!(json["placeId"], "W123");
        assert_eq!(json["types"][0], "museums");
        assert!(json.get("priceLevel").is_none());
    }

    #[test]
    fn geocode_response_from_place() {
        let place = GeocodedPlace {
            location: GeoLocation::new(40.7128, -74.006).unwrap(),
            formatted_address: "New York, NY, USA".to_string(),
            external_id: None,
        };
        let json = serde_json::to_value(GeocodeResponse::from(place)).unwrap();
        assert_eq!(json["lat"], 40.7128);
        assert_eq!(json["formattedAddress"], "New York, NY, USA");
        assert!(json.get("externalId").is_none());
    }
}
