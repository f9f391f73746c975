//! Trip enrichment pipeline
//!
//! Generates an itinerary, then enriches its places one at a time in visiting
//! order. When the geocoder is throttled, a delay separates consecutive
//! places. Each enrichment runs in its own task so a panic in one place
//! degrades that place to a minimal backfill instead of aborting the trip.
//! Refreshing a stored trip follows the same pacing, but keeps a place as it
//! was when its lookups fail.

use std::{sync::Arc, time::Duration};

use domain::{EnrichedPlace, EnrichedTrip, PlaceStub, TripRequest};
use tracing::{error, info, instrument};

use crate::services::{ItineraryGenerator, PlaceEnricher};

/// Default pause between consecutive places on throttled geocoders
pub const DEFAULT_INTER_PLACE_DELAY: Duration = Duration::from_millis(1000);

/// Orchestrates generation and enrichment of a trip
#[derive(Debug)]
pub struct TripEnrichmentPipeline {
    generator: Arc<ItineraryGenerator>,
    enricher: Arc<PlaceEnricher>,
    inter_place_delay: Duration,
}

impl TripEnrichmentPipeline {
    /// Create a pipeline with the default inter-place delay
    pub const fn new(generator: Arc<ItineraryGenerator>, enricher: Arc<PlaceEnricher>) -> Self {
        Self {
            generator,
            enricher,
            inter_place_delay: DEFAULT_INTER_PLACE_DELAY,
        }
    }

    /// Override the pause between places
    #[must_use]
    pub const fn with_inter_place_delay(mut self, delay: Duration) -> Self {
        self.inter_place_delay = delay;
        self
    }

    /// The itinerary generator
    pub fn generator(&self) -> &ItineraryGenerator {
        &self.generator
    }

    /// The place enricher
    pub fn enricher(&self) -> &PlaceEnricher {
        &self.enricher
    }

    /// Build a fully enriched trip for `request`
    #[instrument(skip(self, request), fields(mood = %request.mood(), location = %request.location()))]
    pub async fn build(&self, request: &TripRequest) -> EnrichedTrip {
        let itinerary = self.generator.generate(request).await;
        let reference = itinerary.request.location().to_string();
        let throttle = self.enricher.requires_throttling() && !self.inter_place_delay.is_zero();

        let mut places = Vec::with_capacity(itinerary.places.len());
        for (index, stub) in itinerary.places.iter().enumerate() {
            if throttle && index > 0 {
                tokio::time::sleep(self.inter_place_delay).await;
            }
            places.push(self.enrich_guarded(stub, &reference).await);
        }

        let trip = EnrichedTrip::from_itinerary(itinerary, places);
        info!(
            trip_id = %trip.id,
            places = trip.places.len(),
            fallback = trip.source.is_fallback(),
            route_km = format!("{:.1}", trip.route_distance_km()),
            "Trip enriched"
        );
        trip
    }

    /// Re-run enrichment over a stored trip's places
    ///
    /// Fields the providers cannot supply keep their stored values.
    #[instrument(skip(self, trip), fields(trip_id = %trip.id))]
    pub async fn refresh(&self, trip: &EnrichedTrip) -> EnrichedTrip {
        let reference = trip.request.location().to_string();
        let throttle = self.enricher.requires_throttling() && !self.inter_place_delay.is_zero();

        let mut places = Vec::with_capacity(trip.places.len());
        for (index, place) in trip.places.iter().enumerate() {
            if throttle && index > 0 {
                tokio::time::sleep(self.inter_place_delay).await;
            }
            places.push(self.refresh_guarded(place, &reference).await);
        }

        info!(places = places.len(), "Trip refreshed");
        EnrichedTrip {
            places,
            ..trip.clone()
        }
    }

    async fn refresh_guarded(&self, place: &EnrichedPlace, reference: &str) -> EnrichedPlace {
        let enricher = Arc::clone(&self.enricher);
        let task_place = place.clone();
        let task_reference = reference.to_string();

        match tokio::spawn(async move {
            enricher
                .enrich_existing(&task_place, &task_reference)
                .await
        })
        .await
        {
            Ok(refreshed) => refreshed,
            Err(e) => {
                error!(place = %place.name, error = %e, "Place refresh aborted, keeping stored place");
                place.clone()
            },
        }
    }

    async fn enrich_guarded(&self, stub: &PlaceStub, reference: &str) -> EnrichedPlace {
        let enricher = Arc::clone(&self.enricher);
        let task_stub = stub.clone();
        let task_reference = reference.to_string();

        match tokio::spawn(async move { enricher.enrich(&task_stub, &task_reference).await }).await
        {
            Ok(place) => place,
            Err(e) => {
                error!(place = %stub.name, error = %e, "Place enrichment aborted, using minimal backfill");
                self.enricher.minimal(stub, reference)
            },
        }
    }
}
