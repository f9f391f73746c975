//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod gemini_inference_adapter;
mod geocoding_adapter;
mod poi_catalog_adapter;
mod wikipedia_image_adapter;

pub use gemini_inference_adapter::GeminiInferenceAdapter;
pub use geocoding_adapter::MapsGeocodingAdapter;
pub use poi_catalog_adapter::PoiCatalogAdapter;
pub use wikipedia_image_adapter::WikipediaImageAdapter;

use application::error::ApplicationError;
use integration_maps::MapsError;

/// Convert a maps backend error to an application error
pub(crate) fn map_maps_error(e: MapsError) -> ApplicationError {
    match e {
        MapsError::NotFound(msg) => ApplicationError::NotFound(msg),
        MapsError::ConfigurationMissing(msg) => ApplicationError::Configuration(msg),
        MapsError::ParseError(msg) => ApplicationError::Parse(msg),
        MapsError::RateLimitExceeded => ApplicationError::RateLimited,
        other => ApplicationError::ExternalService(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_keep_their_category() {
        assert!(map_maps_error(MapsError::NotFound("x".into())).is_not_found());
        assert!(matches!(
            map_maps_error(MapsError::RateLimitExceeded),
            ApplicationError::RateLimited
        ));
        assert!(matches!(
            map_maps_error(MapsError::ConfigurationMissing("key".into())),
            ApplicationError::Configuration(_)
        ));
        assert!(matches!(
            map_maps_error(MapsError::ParseError("bad".into())),
            ApplicationError::Parse(_)
        ));
        let transport = map_maps_error(MapsError::Timeout { timeout_secs: 10 });
        assert!(matches!(transport, ApplicationError::ExternalService(_)));
        assert!(transport.is_retryable());
    }
}
