//! Generated itinerary entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{place::PlaceStub, trip_request::TripRequest};
use crate::value_objects::TripId;

/// Fewest places a usable itinerary may contain
pub const MIN_PLACES: usize = 4;

/// Most places an itinerary may contain
pub const MAX_PLACES: usize = 6;

/// Where an itinerary's content came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItinerarySource {
    /// Parsed from a generative-AI response
    Ai { model: String },
    /// Canned template substituted after a failure
    Fallback { reason: String },
}

impl ItinerarySource {
    /// Whether this itinerary is a canned template
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Text content of an itinerary as produced by the generator, before stamping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryContent {
    pub title: String,
    pub description: String,
    pub places: Vec<PlaceStub>,
    pub total_distance_label: String,
    pub estimated_cost_label: String,
    pub best_time_to_start: String,
    pub transportation_tips: String,
    pub weather_notes: String,
    pub additional_tips: String,
}

/// An itinerary of place stubs, stamped with identity and the originating request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItinerary {
    pub id: TripId,
    pub created_at: DateTime<Utc>,
    pub request: TripRequest,
    pub title: String,
    pub description: String,
    /// Visiting order is significant
    pub places: Vec<PlaceStub>,
    pub total_distance_label: String,
    pub estimated_cost_label: String,
    pub best_time_to_start: String,
    pub transportation_tips: String,
    pub weather_notes: String,
    pub additional_tips: String,
    pub source: ItinerarySource,
}

impl GeneratedItinerary {
    /// Stamp content with a fresh identifier and creation time
    #[must_use]
    pub fn stamp(request: TripRequest, content: ItineraryContent, source: ItinerarySource) -> Self {
        Self {
            id: TripId::new(),
            created_at: Utc::now(),
            request,
            title: content.title,
            description: content.description,
            places: content.places,
            total_distance_label: content.total_distance_label,
            estimated_cost_label: content.estimated_cost_label,
            best_time_to_start: content.best_time_to_start,
            transportation_tips: content.transportation_tips,
            weather_notes: content.weather_notes,
            additional_tips: content.additional_tips,
            source,
        }
    }
}
