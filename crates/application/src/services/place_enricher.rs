//! Place enrichment
//!
//! Resolves a place stub to an [`EnrichedPlace`]. Every external lookup is
//! best effort; whatever no provider supplies is backfilled, so enrichment
//! itself never fails.
//!
//! Field precedence, highest first: geocoder, POI catalog, image lookup,
//! values the place already had, synthetic backfill.

use std::{fmt, sync::Arc};

use domain::{EnrichedPlace, GeoLocation, PlaceDraft, PlaceStub};
use tracing::{debug, instrument, warn};

use crate::{
    ports::{GeocodingPort, ImageLookupPort, NearbyPlace, PoiCatalogPort},
    services::SyntheticFiller,
};

/// Default POI search radius in meters
pub const DEFAULT_POI_RADIUS_M: u32 = 1000;

/// Default maximum POI candidates per search
pub const DEFAULT_POI_LIMIT: u32 = 10;

/// Pick the catalog entry that best matches `name`
///
/// Case-insensitive containment in either direction; the first match wins,
/// else the first candidate.
pub fn best_match<'a>(name: &str, candidates: &'a [NearbyPlace]) -> Option<&'a NearbyPlace> {
    let needle = name.trim().to_lowercase();
    candidates
        .iter()
        .find(|c| {
            let candidate = c.name.trim().to_lowercase();
            !candidate.is_empty()
                && !needle.is_empty()
                && (candidate.contains(&needle) || needle.contains(&candidate))
        })
        .or_else(|| candidates.first())
}

/// Enriches place stubs with geodata
pub struct PlaceEnricher {
    geocoder: Arc<dyn GeocodingPort>,
    poi_catalog: Option<Arc<dyn PoiCatalogPort>>,
    images: Option<Arc<dyn ImageLookupPort>>,
    filler: Arc<SyntheticFiller>,
    poi_radius_m: u32,
    poi_limit: u32,
}

impl fmt::Debug for PlaceEnricher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceEnricher")
            .field("geocoder", &self.geocoder.provider_name())
            .field("poi_catalog", &self.poi_catalog.is_some())
            .field("images", &self.images.is_some())
            .field("poi_radius_m", &self.poi_radius_m)
            .field("poi_limit", &self.poi_limit)
            .finish_non_exhaustive()
    }
}

impl PlaceEnricher {
    /// Create an enricher with only a geocoder
    pub fn new(geocoder: Arc<dyn GeocodingPort>, filler: Arc<SyntheticFiller>) -> Self {
        Self {
            geocoder,
            poi_catalog: None,
            images: None,
            filler,
            poi_radius_m: DEFAULT_POI_RADIUS_M,
            poi_limit: DEFAULT_POI_LIMIT,
        }
    }

    /// Add a POI catalog for ratings and opening hours
    #[must_use]
    pub fn with_poi_catalog(mut self, catalog: Arc<dyn PoiCatalogPort>) -> Self {
        self.poi_catalog = Some(catalog);
        self
    }

    /// Add an image lookup
    #[must_use]
    pub fn with_image_lookup(mut self, images: Arc<dyn ImageLookupPort>) -> Self {
        self.images = Some(images);
        self
    }

    /// Override the POI search radius and result limit
    #[must_use]
    pub const fn with_poi_search(mut self, radius_m: u32, limit: u32) -> Self {
        self.poi_radius_m = radius_m;
        self.poi_limit = limit;
        self
    }

    /// Whether the geocoder needs paced request bursts
    pub fn requires_throttling(&self) -> bool {
        self.geocoder.requires_throttling()
    }

    /// The geocoder's backend name
    pub fn geocoder_name(&self) -> &'static str {
        self.geocoder.provider_name()
    }

    /// Whether a POI catalog is configured
    pub fn has_poi_catalog(&self) -> bool {
        self.poi_catalog.is_some()
    }

    /// Whether an image lookup is configured
    pub fn has_image_lookup(&self) -> bool {
        self.images.is_some()
    }

    /// Enrich a freshly generated stub
    #[instrument(skip(self, stub), fields(place = %stub.name))]
    pub async fn enrich(&self, stub: &PlaceStub, reference: &str) -> EnrichedPlace {
        self.enrich_draft(stub, PlaceDraft::from_stub(stub), reference)
            .await
    }

    /// Re-enrich a place, keeping what it already has when lookups fail
    #[instrument(skip(self, place), fields(place = %place.name))]
    pub async fn enrich_existing(&self, place: &EnrichedPlace, reference: &str) -> EnrichedPlace {
        self.enrich_draft(&place.to_stub(), place.to_draft(), reference)
            .await
    }

    /// Backfill only, with no lookups
    pub fn minimal(&self, stub: &PlaceStub, reference: &str) -> EnrichedPlace {
        EnrichedPlace::from_draft(
            stub.clone(),
            PlaceDraft::from_stub(stub),
            self.filler.backfill(stub, reference),
        )
    }

    async fn enrich_draft(
        &self,
        stub: &PlaceStub,
        existing: PlaceDraft,
        reference: &str,
    ) -> EnrichedPlace {
        let geocoded = self.geocode(stub, reference).await;
        let anchor = geocoded.location.or(existing.location);

        let (poi, image) = tokio::join!(
            self.lookup_poi(&stub.name, anchor),
            self.lookup_image(&stub.name, reference)
        );

        let merged = geocoded.coalesce(poi).coalesce(image).coalesce(existing);
        let missing = merged.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "Backfilling place fields");
        }

        EnrichedPlace::from_draft(
            stub.clone(),
            merged,
            self.filler.backfill(stub, reference),
        )
    }

    async fn geocode(&self, stub: &PlaceStub, reference: &str) -> PlaceDraft {
        let query = format!("{} {}", stub.name.trim(), reference.trim());
        match self.geocoder.geocode(query.trim()).await {
            Ok(hit) => PlaceDraft {
                address: Some(hit.formatted_address),
                location: Some(hit.location),
                external_id: hit.external_id,
                ..PlaceDraft::default()
            },
            Err(e) if e.is_not_found() => {
                warn!(%query, provider = self.geocoder.provider_name(), "No geocoding result");
                PlaceDraft::default()
            },
            Err(e) => {
                warn!(%query, provider = self.geocoder.provider_name(), error = %e, "Geocoding failed");
                PlaceDraft::default()
            },
        }
    }

    async fn lookup_poi(&self, name: &str, anchor: Option<GeoLocation>) -> PlaceDraft {
        let (Some(catalog), Some(location)) = (&self.poi_catalog, anchor) else {
            return PlaceDraft::default();
        };

        let candidates = match catalog
            .nearby(location, self.poi_radius_m, self.poi_limit)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "POI lookup failed");
                return PlaceDraft::default();
            },
        };

        let Some(hit) = best_match(name, &candidates) else {
            debug!("No POI candidates nearby");
            return PlaceDraft::default();
        };
        debug!(candidate = %hit.name, "POI match");

        let opening_hours = match &hit.external_id {
            Some(id) => catalog.opening_hours(id).await.unwrap_or_else(|e| {
                warn!(error = %e, "Opening hours lookup failed");
                None
            }),
            None => None,
        };

        PlaceDraft {
            rating: hit.rating,
            review_count: hit.review_count,
            price_level: hit.price_level,
            external_id: hit.external_id.clone(),
            opening_hours,
            ..PlaceDraft::default()
        }
    }

    async fn lookup_image(&self, name: &str, reference: &str) -> PlaceDraft {
        let Some(images) = &self.images else {
            return PlaceDraft::default();
        };

        let titles = [
            name.trim().to_string(),
            format!("{} {}", name.trim(), reference.trim()),
        ];
        for title in &titles {
            match images.thumbnail(title).await {
                Ok(Some(url)) => {
                    return PlaceDraft {
                        image_url: Some(url),
                        ..PlaceDraft::default()
                    };
                },
                Ok(None) => {},
                Err(e) => warn!(%title, error = %e, "Image lookup failed"),
            }
        }
        PlaceDraft::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ApplicationError,
        ports::{GeocodedPlace, MockGeocodingPort, MockImageLookupPort, MockPoiCatalogPort},
        services::synthetic::{BACKFILL_RATING, BACKFILL_REVIEW_COUNT, JITTER_DEGREES},
    };

    fn nearby(name: &str) -> NearbyPlace {
        NearbyPlace {
            name: name.to_string(),
            ..NearbyPlace::default()
        }
    }

    fn missing_geocoder() -> MockGeocodingPort {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_geocode()
            .returning(|q| Err(ApplicationError::NotFound(q.to_string())));
        geocoder.expect_provider_name().return_const("nominatim");
        geocoder
    }

    fn louvre_geocoder() -> MockGeocodingPort {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_geocode()
            .withf(|q| q == "Louvre Museum Paris")
            .returning(|_| {
                Ok(GeocodedPlace {
                    location: GeoLocation::new(48.8606, 2.3376).unwrap(),
                    formatted_address: "Rue de Rivoli, 75001 Paris, France".to_string(),
                    external_id: Some("way/1".to_string()),
                })
            });
        geocoder.expect_provider_name().return_const("nominatim");
        geocoder
    }

    fn enricher(geocoder: MockGeocodingPort) -> PlaceEnricher {
        PlaceEnricher::new(Arc::new(geocoder), Arc::new(SyntheticFiller::seeded(11)))
    }

    #[test]
    fn best_match_prefers_containment() {
        let candidates = vec![nearby("Cafe Marly"), nearby("Musée du Louvre"), nearby("Louvre")];
        assert_eq!(best_match("The Louvre", &candidates).unwrap().name, "Louvre");
        assert_eq!(best_match("cafe marly", &candidates).unwrap().name, "Cafe Marly");
    }

    #[test]
    fn best_match_falls_back_to_first() {
        let candidates = vec![nearby("Tuileries"), nearby("Orangerie")];
        assert_eq!(best_match("Louvre", &candidates).unwrap().name, "Tuileries");
        assert!(best_match("Louvre", &[]).is_none());
    }

    #[test]
    fn best_match_ignores_blank_candidate_names() {
        let candidates = vec![nearby("Tuileries"), nearby(""), nearby("Louvre Pyramid")];
        assert_eq!(best_match("Louvre", &candidates).unwrap().name, "Louvre Pyramid");
    }

    #[tokio::test]
    async fn geocoded_place_adopts_provider_data() {
        let place = enricher(louvre_geocoder())
            .enrich(&PlaceStub::new("Louvre Museum", "Museum"), "Paris")
            .await;

        assert_eq!(place.address, "Rue de Rivoli, 75001 Paris, France");
        assert!((place.latitude - 48.8606).abs() < 1e-9);
        assert_eq!(place.external_id.as_deref(), Some("way/1"));
        assert!(BACKFILL_RATING.contains(&place.rating));
        assert!(BACKFILL_REVIEW_COUNT.contains(&place.review_count));
        assert!(!place.image_url.is_empty());
    }

    #[tokio::test]
    async fn zero_results_jitter_around_reference_city() {
        let place = enricher(missing_geocoder())
            .enrich(&PlaceStub::new("Hidden Courtyard", "Garden"), "Paris")
            .await;

        let paris = GeoLocation::city_centroid("Paris");
        assert!((place.latitude - paris.latitude()).abs() <= JITTER_DEGREES + 1e-9);
        assert!((place.longitude - paris.longitude()).abs() <= JITTER_DEGREES + 1e-9);
        assert_eq!(place.address, "Hidden Courtyard, Paris");
    }

    #[tokio::test]
    async fn transport_error_keeps_stub_address() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_geocode()
            .returning(|_| Err(ApplicationError::ExternalService("timeout".to_string())));
        geocoder.expect_provider_name().return_const("google");

        let stub = PlaceStub::new("Botanical Garden", "Park").with_address("100 Garden Lane");
        let place = enricher(geocoder).enrich(&stub, "Paris").await;
        assert_eq!(place.address, "100 Garden Lane");
    }

    #[tokio::test]
    async fn poi_and_image_data_are_merged() {
        let mut catalog = MockPoiCatalogPort::new();
        catalog
            .expect_nearby()
            .withf(|_, radius, limit| *radius == 500 && *limit == 5)
            .returning(|_, _, _| {
                Ok(vec![
                    NearbyPlace {
                        name: "Cafe Marly".to_string(),
                        rating: Some(4.1),
                        ..NearbyPlace::default()
                    },
                    NearbyPlace {
                        name: "Musée du Louvre Museum".to_string(),
                        rating: Some(4.74),
                        review_count: Some(250_000),
                        price_level: Some(2),
                        external_id: Some("louvre".to_string()),
                        kinds: vec!["museums".to_string()],
                    },
                ])
            });
        catalog
            .expect_opening_hours()
            .withf(|id| id == "louvre")
            .returning(|_| Ok(Some(vec!["Monday: 9:00 AM - 6:00 PM".to_string()])));

        let mut images = MockImageLookupPort::new();
        images
            .expect_thumbnail()
            .withf(|title| title == "Louvre Museum")
            .returning(|_| Ok(Some("https://upload.wikimedia.org/louvre.jpg".to_string())));

        let place = enricher(louvre_geocoder())
            .with_poi_catalog(Arc::new(catalog))
            .with_image_lookup(Arc::new(images))
            .with_poi_search(500, 5)
            .enrich(&PlaceStub::new("Louvre Museum", "Museum"), "Paris")
            .await;

        assert!((place.rating - 4.7).abs() < 1e-6);
        assert_eq!(place.review_count, 250_000);
        assert_eq!(place.price_level, Some(2));
        assert_eq!(place.image_url, "https://upload.wikimedia.org/louvre.jpg");
        assert_eq!(place.opening_hours.as_ref().map(Vec::len), Some(1));
        // geocoder identifier outranks the catalog's
        assert_eq!(place.external_id.as_deref(), Some("way/1"));
    }

    #[tokio::test]
    async fn image_lookup_retries_with_location() {
        let mut images = MockImageLookupPort::new();
        images
            .expect_thumbnail()
            .withf(|title| title == "Art Gallery")
            .returning(|_| Ok(None));
        images
            .expect_thumbnail()
            .withf(|title| title == "Art Gallery Paris")
            .returning(|_| Ok(Some("https://img/gallery.jpg".to_string())));

        let place = enricher(missing_geocoder())
            .with_image_lookup(Arc::new(images))
            .enrich(&PlaceStub::new("Art Gallery", "Cultural"), "Paris")
            .await;
        assert_eq!(place.image_url, "https://img/gallery.jpg");
    }

    #[tokio::test]
    async fn secondary_failures_are_swallowed() {
        let mut catalog = MockPoiCatalogPort::new();
        catalog
            .expect_nearby()
            .returning(|_, _, _| Err(ApplicationError::ExternalService("HTTP 500".to_string())));
        let mut images = MockImageLookupPort::new();
        images
            .expect_thumbnail()
            .returning(|_| Err(ApplicationError::ExternalService("HTTP 503".to_string())));

        let place = enricher(louvre_geocoder())
            .with_poi_catalog(Arc::new(catalog))
            .with_image_lookup(Arc::new(images))
            .enrich(&PlaceStub::new("Louvre Museum", "Museum"), "Paris")
            .await;

        assert_eq!(place.address, "Rue de Rivoli, 75001 Paris, France");
        assert!(place.image_url.starts_with("https://picsum.photos/"));
        assert!(BACKFILL_RATING.contains(&place.rating));
    }

    #[tokio::test]
    async fn poi_skipped_without_coordinates() {
        let mut catalog = MockPoiCatalogPort::new();
        catalog.expect_nearby().never();

        let place = enricher(missing_geocoder())
            .with_poi_catalog(Arc::new(catalog))
            .enrich(&PlaceStub::new("Somewhere", "Park"), "Tokyo")
            .await;
        assert!(place.external_id.is_none());
    }

    #[tokio::test]
    async fn re_enrichment_keeps_existing_fields_when_lookups_fail() {
        let original = EnrichedPlace::from_draft(
            PlaceStub::new("Botanical Garden", "Park"),
            PlaceDraft {
                address: Some("57 Rue Cuvier, 75005 Paris".to_string()),
                location: Some(GeoLocation::new(48.8443, 2.3596).unwrap()),
                rating: Some(4.6),
                review_count: Some(1234),
                image_url: Some("https://upload.wikimedia.org/jardin.jpg".to_string()),
                external_id: Some("way/25410164".to_string()),
                opening_hours: Some(vec!["Daily: 8:00 AM - 8:00 PM".to_string()]),
                price_level: Some(0),
            },
            SyntheticFiller::seeded(1).backfill(&PlaceStub::new("x", "y"), "Paris"),
        );

        let again = enricher(missing_geocoder())
            .enrich_existing(&original, "Paris")
            .await;
        assert_eq!(again, original);
    }

    #[test]
    fn minimal_is_complete() {
        let enricher = enricher(missing_geocoder());
        let place = enricher.minimal(&PlaceStub::new("Rooftop Bar", "Nightlife"), "Chicago");
        assert!(BACKFILL_RATING.contains(&place.rating));
        assert!(BACKFILL_REVIEW_COUNT.contains(&place.review_count));
        assert!(!place.image_url.is_empty());
        assert_eq!(place.address, "Rooftop Bar, Chicago");
    }

    #[test]
    fn debug_lists_capabilities() {
        let debug = format!("{:?}", enricher(missing_geocoder()));
        assert!(debug.contains("nominatim"));
        assert!(debug.contains("poi_catalog: false"));
    }
}
