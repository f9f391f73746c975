//! Trip service - generation, persistence and retrieval of trips

use std::{fmt, sync::Arc};

use domain::{EnrichedTrip, TripId, TripRequest};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{TripFilter, TripStorePort},
    services::TripEnrichmentPipeline,
};

/// Default page size for trip listings
pub const DEFAULT_LIST_LIMIT: u32 = 20;

/// Largest accepted page size for trip listings
pub const MAX_LIST_LIMIT: u32 = 100;

/// Service for trip use cases
pub struct TripService {
    pipeline: Arc<TripEnrichmentPipeline>,
    store: Arc<dyn TripStorePort>,
}

impl fmt::Debug for TripService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripService")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

impl TripService {
    /// Create a new trip service
    pub fn new(pipeline: Arc<TripEnrichmentPipeline>, store: Arc<dyn TripStorePort>) -> Self {
        Self { pipeline, store }
    }

    /// The enrichment pipeline
    pub fn pipeline(&self) -> &TripEnrichmentPipeline {
        &self.pipeline
    }

    /// Generate, enrich and persist a trip
    #[instrument(skip(self, request), fields(mood = %request.mood(), location = %request.location()))]
    pub async fn generate_trip(&self, request: &TripRequest) -> Result<EnrichedTrip, ApplicationError> {
        request.validate()?;
        let trip = self.pipeline.build(request).await;
        let id = self.store.save_trip(&trip).await?;
        info!(trip_id = %id, "Trip generated and saved");
        Ok(trip)
    }

    /// Persist a client-supplied trip
    ///
    /// Every place must satisfy the enriched-place invariants. The view
    /// counter is not taken from the client; a saved trip starts unviewed.
    #[instrument(skip(self, trip), fields(trip_id = %trip.id))]
    pub async fn save_trip(&self, trip: &EnrichedTrip) -> Result<TripId, ApplicationError> {
        trip.validate()?;
        let trip = EnrichedTrip {
            view_count: 0,
            ..trip.clone()
        };
        self.store.save_trip(&trip).await
    }

    /// Re-enrich a stored trip's places and save the result
    ///
    /// Does not count as a view.
    #[instrument(skip(self))]
    pub async fn refresh_trip(&self, id: &TripId) -> Result<EnrichedTrip, ApplicationError> {
        let stored = self
            .store
            .find_trip(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("trip {id}")))?;
        let trip = self.pipeline.refresh(&stored).await;
        self.store.save_trip(&trip).await?;
        info!(trip_id = %id, "Trip refreshed and saved");
        Ok(trip)
    }

    /// Fetch a trip, counting the view
    #[instrument(skip(self))]
    pub async fn get_trip(&self, id: &TripId) -> Result<EnrichedTrip, ApplicationError> {
        let trip = self
            .store
            .get_trip_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("trip {id}")))?;
        debug!(views = trip.view_count, "Trip loaded");
        Ok(trip)
    }

    /// Newest public trips
    pub async fn list_public_trips(&self, limit: Option<u32>) -> Result<Vec<EnrichedTrip>, ApplicationError> {
        self.store.list_public_trips(clamp_limit(limit)).await
    }

    /// Search public trips by title, description or location
    ///
    /// A blank query with no filter lists the newest public trips.
    pub async fn search_public_trips(
        &self,
        query: &str,
        filter: &TripFilter,
        limit: Option<u32>,
    ) -> Result<Vec<EnrichedTrip>, ApplicationError> {
        let query = query.trim();
        let filter = TripFilter {
            mood: filter.mood,
            location: filter
                .location
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        };
        if query.is_empty() && filter.is_empty() {
            return self.list_public_trips(limit).await;
        }
        self.store
            .search_public_trips(query, &filter, clamp_limit(limit))
            .await
    }
}

fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}
