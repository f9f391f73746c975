//! Construction-time wiring of the enrichment ports
//!
//! Chooses the AI backend and the geodata providers from [`AppConfig`] once
//! at startup; nothing is re-selected per request.

use std::{fmt, sync::Arc};

use application::{
    ItineraryGenerator, PlaceEnricher, SyntheticFiller, TripEnrichmentPipeline,
    error::ApplicationError,
    ports::{GeocodingPort, ImageLookupPort, InferencePort, PoiCatalogPort},
};
use integration_maps::MapsProviders;
use tracing::info;

use crate::{
    adapters::{
        GeminiInferenceAdapter, MapsGeocodingAdapter, PoiCatalogAdapter, WikipediaImageAdapter,
        map_maps_error,
    },
    config::{AppConfig, PipelineConfig},
};

/// The ports a pipeline is assembled from
#[derive(Clone)]
pub struct EnrichmentPorts {
    /// AI backend; `None` means template itineraries only
    pub inference: Option<Arc<dyn InferencePort>>,
    /// Primary geocoder
    pub geocoder: Arc<dyn GeocodingPort>,
    /// Optional nearby-POI catalog
    pub poi_catalog: Option<Arc<dyn PoiCatalogPort>>,
    /// Optional thumbnail lookup
    pub images: Option<Arc<dyn ImageLookupPort>>,
}

impl fmt::Debug for EnrichmentPorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichmentPorts")
            .field("inference", &self.inference.as_ref().map(|i| i.current_model()))
            .field("geocoder", &self.geocoder.provider_name())
            .field("poi_catalog", &self.poi_catalog.is_some())
            .field("images", &self.images.is_some())
            .finish()
    }
}

impl EnrichmentPorts {
    /// Assemble the pipeline around these ports
    #[must_use]
    pub fn into_pipeline(self, config: &PipelineConfig) -> TripEnrichmentPipeline {
        let filler = Arc::new(SyntheticFiller::new());
        let generator = ItineraryGenerator::new(self.inference, Arc::clone(&filler));

        let mut enricher = PlaceEnricher::new(self.geocoder, filler)
            .with_poi_search(config.poi_radius_m, config.poi_limit);
        if let Some(catalog) = self.poi_catalog {
            enricher = enricher.with_poi_catalog(catalog);
        }
        if let Some(images) = self.images {
            enricher = enricher.with_image_lookup(images);
        }

        TripEnrichmentPipeline::new(Arc::new(generator), Arc::new(enricher))
            .with_inter_place_delay(config.inter_place_delay())
    }
}

/// Build the enrichment ports described by `config`
///
/// # Errors
///
/// Returns an error if a configured client cannot be constructed.
pub fn build_enrichment_ports(config: &AppConfig) -> Result<EnrichmentPorts, ApplicationError> {
    let inference: Option<Arc<dyn InferencePort>> = if config.ai.has_api_key() {
        Some(Arc::new(GeminiInferenceAdapter::new(config.ai.clone())?))
    } else {
        info!("No AI API key configured, itineraries will use templates");
        None
    };

    let providers = MapsProviders::from_config(&config.maps).map_err(map_maps_error)?;
    let geocoder: Arc<dyn GeocodingPort> = Arc::new(MapsGeocodingAdapter::new(providers.geocoder));
    let poi_catalog = providers
        .poi_catalog
        .map(|c| Arc::new(PoiCatalogAdapter::new(c)) as Arc<dyn PoiCatalogPort>);
    let images = providers
        .thumbnails
        .map(|c| Arc::new(WikipediaImageAdapter::new(c)) as Arc<dyn ImageLookupPort>);

    info!(
        ai = inference.is_some(),
        geocoder = geocoder.provider_name(),
        poi_catalog = poi_catalog.is_some(),
        images = images.is_some(),
        "Enrichment providers selected"
    );

    Ok(EnrichmentPorts {
        inference,
        geocoder,
        poi_catalog,
        images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyless_config_uses_templates_and_nominatim() {
        let mut config = AppConfig::for_testing();
        config.maps.wikipedia.enabled = false;

        let ports = build_enrichment_ports(&config).unwrap();
        assert!(ports.inference.is_none());
        assert_eq!(ports.geocoder.provider_name(), "nominatim");
        assert!(ports.geocoder.requires_throttling());
        assert!(ports.poi_catalog.is_none());
        assert!(ports.images.is_none());
    }

    #[test]
    fn keys_select_gemini_and_google() {
        let mut config = AppConfig::for_testing();
        config.ai.api_key = Some("gem".to_string());
        config.maps.google.api_key = Some("maps".to_string());

        let ports = build_enrichment_ports(&config).unwrap();
        assert!(ports.inference.is_some());
        assert_eq!(ports.geocoder.provider_name(), "google");
        assert!(!ports.geocoder.requires_throttling());
        assert!(ports.poi_catalog.is_some());
        assert!(ports.images.is_some());
    }

    #[test]
    fn opentripmap_key_adds_poi_catalog() {
        let mut config = AppConfig::for_testing();
        config.maps.opentripmap.api_key = Some("otm".to_string());

        let ports = build_enrichment_ports(&config).unwrap();
        assert_eq!(ports.geocoder.provider_name(), "nominatim");
        assert!(ports.poi_catalog.is_some());
    }

    #[test]
    fn pipeline_reflects_ports() {
        let mut config = AppConfig::default();
        config.maps.wikipedia.enabled = false;
        config.pipeline.inter_place_delay_ms = 1500;

        let pipeline = build_enrichment_ports(&config)
            .unwrap()
            .into_pipeline(&config.pipeline);
        assert!(!pipeline.generator().has_inference());
        assert!(pipeline.enricher().requires_throttling());
        assert!(!pipeline.enricher().has_image_lookup());
        assert_eq!(pipeline.enricher().geocoder_name(), "nominatim");
    }
}
