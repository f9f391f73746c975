//! Trip storage port
//!
//! Defines the interface for persisting and serving enriched trips.

use async_trait::async_trait;
use domain::{EnrichedTrip, Mood, TripId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Optional narrowing of a trip search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripFilter {
    /// Exact mood
    pub mood: Option<Mood>,
    /// Substring of the trip's location
    pub location: Option<String>,
}

impl TripFilter {
    /// Whether the filter narrows anything
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mood.is_none() && self.location.is_none()
    }
}

/// Port for trip persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TripStorePort: Send + Sync {
    /// Save a trip, replacing any trip with the same ID
    ///
    /// # Returns
    /// The ID of the saved trip
    async fn save_trip(&self, trip: &EnrichedTrip) -> Result<TripId, ApplicationError>;

    /// Get a trip by ID
    ///
    /// Increments the trip's view counter before reading it back, so the
    /// returned trip already includes this view.
    async fn get_trip_by_id(&self, id: &TripId) -> Result<Option<EnrichedTrip>, ApplicationError>;

    /// Get a trip by ID without counting a view
    async fn find_trip(&self, id: &TripId) -> Result<Option<EnrichedTrip>, ApplicationError>;

    /// Public trips, newest first
    async fn list_public_trips(&self, limit: u32) -> Result<Vec<EnrichedTrip>, ApplicationError>;

    /// Public trips whose title, description or location contains `query`,
    /// narrowed by `filter`
    async fn search_public_trips(
        &self,
        query: &str,
        filter: &TripFilter,
        limit: u32,
    ) -> Result<Vec<EnrichedTrip>, ApplicationError>;
}
