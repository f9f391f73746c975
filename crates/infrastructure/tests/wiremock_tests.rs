//! Integration tests for the infrastructure crate
//!
//! Drives the fully wired pipeline against wiremock stand-ins for the Gemini,
//! Nominatim and Wikipedia backends.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use application::{
    TripService,
    ports::{TripFilter, TripStorePort},
};
use domain::{BudgetTier, ItinerarySource, Mood, TripRequest};
use infrastructure::{
    AppConfig, DatabaseConfig, SqliteTripStore, build_enrichment_ports, create_pool,
};
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn itinerary_text() -> String {
    json!({
        "title": "Slow Sunday in Paris",
        "description": "Gardens, books and the river.",
        "itinerary": [
            {"name": "Jardin du Luxembourg", "type": "Park", "time": "9:00 AM", "duration": "1 hour",
             "description": "Morning stroll", "cost": "Free"},
            {"name": "Shakespeare and Company", "type": "Bookstore", "time": "10:30 AM",
             "duration": "1 hour", "description": "Browse", "cost": "$"},
            {"name": "Musée d'Orsay", "type": "Museum", "time": "12:00 PM", "duration": "2 hours",
             "description": "Impressionists", "cost": "$$"},
            {"name": "Seine Cruise", "type": "Tour", "time": "3:00 PM", "duration": "1 hour",
             "description": "River views", "cost": "$$"}
        ],
        "totalDistance": "6.2 km",
        "estimatedCost": "$30 - $75",
        "bestTimeToStart": "9:00 AM",
        "transportationTips": "Use the metro.",
        "weatherConsiderations": "Bring a jacket.",
        "additionalTips": "Book the museum online."
    })
    .to_string()
}

async fn mount_backends(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": format!("```json\n{}\n```", itinerary_text())}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 400, "candidatesTokenCount": 300, "totalTokenCount": 700}
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Seine Cruise Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "lat": "48.8462",
            "lon": "2.3372",
            "display_name": "Somewhere, 6e Arrondissement, Paris, France",
            "osm_type": "way",
            "osm_id": 4_245_011
        }])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/page/summary/.+"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Somewhere",
            "thumbnail": {"source": "https://upload.wikimedia.org/thumb.jpg"}
        })))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::for_testing();
    config.ai.base_url = server.uri();
    config.ai.api_key = Some("test-key".to_string());
    config.maps = integration_maps::MapsConfig::for_testing(&server.uri());
    config.maps.nominatim.min_interval_ms = 1;
    config
}

fn chill_paris() -> TripRequest {
    TripRequest::new(Mood::Chill, "Paris", 6, BudgetTier::new(2).unwrap()).unwrap()
}

#[tokio::test]
async fn wired_pipeline_enriches_ai_itinerary() {
    let server = MockServer::start().await;
    mount_backends(&server).await;
    let config = config_for(&server);

    let pipeline = build_enrichment_ports(&config)
        .unwrap()
        .into_pipeline(&config.pipeline);
    let trip = pipeline.build(&chill_paris()).await;

    assert_eq!(trip.title, "Slow Sunday in Paris");
    assert!(matches!(trip.source, ItinerarySource::Ai { .. }));
    assert_eq!(trip.places.len(), 4);
    assert_eq!(trip.total_distance_label, "6.2 km");

    let garden = &trip.places[0];
    assert_eq!(garden.name, "Jardin du Luxembourg");
    assert_eq!(garden.address, "Somewhere, 6e Arrondissement, Paris, France");
    assert!((garden.latitude - 48.8462).abs() < 1e-6);
    assert_eq!(garden.external_id.as_deref(), Some("way/4245011"));
    assert_eq!(garden.image_url, "https://upload.wikimedia.org/thumb.jpg");

    // geocoding miss: coordinates come from jitter around the city centre
    let cruise = &trip.places[3];
    assert_eq!(cruise.name, "Seine Cruise");
    assert!(cruise.external_id.is_none());
    assert!((cruise.latitude - 48.8566).abs() <= 0.02 + 1e-9);
    assert_eq!(cruise.image_url, "https://upload.wikimedia.org/thumb.jpg");
}

#[tokio::test]
async fn failing_ai_backend_falls_back_to_template() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.maps.wikipedia.enabled = false;

    let pipeline = build_enrichment_ports(&config)
        .unwrap()
        .into_pipeline(&config.pipeline);
    let trip = pipeline.build(&chill_paris()).await;

    assert!(trip.source.is_fallback());
    assert!(trip.title.contains("Peaceful Relaxation Day"));
    assert_eq!(trip.places.len(), 4);
    for place in &trip.places {
        assert!(!place.address.is_empty());
        assert!((3.0..=5.0).contains(&place.rating));
        assert!(place.image_url.starts_with("https://"));
    }
}

#[tokio::test]
async fn trip_service_persists_wired_trip() {
    let server = MockServer::start().await;
    mount_backends(&server).await;
    let config = config_for(&server);

    let pipeline = build_enrichment_ports(&config)
        .unwrap()
        .into_pipeline(&config.pipeline);

    let dir = tempfile::tempdir().unwrap();
    let db = DatabaseConfig {
        path: dir.path().join("trips.db").to_string_lossy().into_owned(),
        ..DatabaseConfig::default()
    };
    let store: Arc<dyn TripStorePort> =
        Arc::new(SqliteTripStore::new(Arc::new(create_pool(&db).unwrap())));
    let service = TripService::new(Arc::new(pipeline), Arc::clone(&store));

    let trip = service.generate_trip(&chill_paris()).await.unwrap();
    let loaded = service.get_trip(&trip.id).await.unwrap();
    assert_eq!(loaded.places, trip.places);
    assert_eq!(loaded.view_count, 1);

    let found = service
        .search_public_trips("sunday", &TripFilter::default(), None)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let other_mood = TripFilter {
        mood: Some(Mood::Fun),
        location: None,
    };
    assert!(
        service
            .search_public_trips("sunday", &other_mood, None)
            .await
            .unwrap()
            .is_empty()
    );
}
