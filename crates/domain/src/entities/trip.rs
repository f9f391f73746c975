//! Enriched trip entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    itinerary::{GeneratedItinerary, ItinerarySource},
    place::EnrichedPlace,
    trip_request::TripRequest,
};
use crate::{errors::DomainError, value_objects::TripId};

const fn default_true() -> bool {
    true
}

/// A generated itinerary whose places have all been enriched
///
/// Immutable after creation apart from the view counter kept by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTrip {
    pub id: TripId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub request: TripRequest,
    pub title: String,
    pub description: String,
    #[serde(rename = "itinerary")]
    pub places: Vec<EnrichedPlace>,
    #[serde(rename = "totalDistance")]
    pub total_distance_label: String,
    #[serde(rename = "estimatedCost")]
    pub estimated_cost_label: String,
    pub best_time_to_start: String,
    pub transportation_tips: String,
    #[serde(rename = "weatherConsiderations")]
    pub weather_notes: String,
    pub additional_tips: String,
    pub source: ItinerarySource,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default, rename = "views")]
    pub view_count: u64,
}

impl EnrichedTrip {
    /// Replace the itinerary's stubs with their enriched counterparts
    ///
    /// `places` must be in the itinerary's visiting order.
    #[must_use]
    pub fn from_itinerary(itinerary: GeneratedItinerary, places: Vec<EnrichedPlace>) -> Self {
        Self {
            id: itinerary.id,
            created_at: itinerary.created_at,
            request: itinerary.request,
            title: itinerary.title,
            description: itinerary.description,
            places,
            total_distance_label: itinerary.total_distance_label,
            estimated_cost_label: itinerary.estimated_cost_label,
            best_time_to_start: itinerary.best_time_to_start,
            transportation_tips: itinerary.transportation_tips,
            weather_notes: itinerary.weather_notes,
            additional_tips: itinerary.additional_tips,
            source: itinerary.source,
            is_public: true,
            view_count: 0,
        }
    }

    /// Check a trip received from a client before it is stored
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }
        if self.places.is_empty() {
            return Err(DomainError::validation("itinerary must not be empty"));
        }
        self.request.validate()?;
        self.places.iter().try_for_each(EnrichedPlace::validate)
    }

    /// Straight-line distance along the visiting order, in kilometers
    #[must_use]
    pub fn route_distance_km(&self) -> f64 {
        self.places
            .windows(2)
            .map(|pair| pair[0].location().distance_km(&pair[1].location()))
            .sum()
    }
}
