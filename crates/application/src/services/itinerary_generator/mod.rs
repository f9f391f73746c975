//! Itinerary generation with a canned fallback
//!
//! [`ItineraryGenerator::generate`] never fails: a missing AI backend, a
//! transport error or unusable output all degrade to the mood's template.

mod parser;
mod prompt;
mod templates;

use std::{fmt, sync::Arc};

use domain::{GeneratedItinerary, ItineraryContent, ItinerarySource, TripRequest};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{error::ApplicationError, ports::InferencePort, services::SyntheticFiller};

/// Readiness of the generator's AI backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GeneratorHealth {
    /// No AI backend configured; templates only
    Mock,
    /// AI backend reachable
    Healthy { model: String },
    /// AI backend configured but failing
    Unhealthy { reason: String },
}

impl GeneratorHealth {
    /// Short mode name
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Healthy { .. } => "healthy",
            Self::Unhealthy { .. } => "unhealthy",
        }
    }
}

/// Builds itineraries from trip requests
pub struct ItineraryGenerator {
    inference: Option<Arc<dyn InferencePort>>,
    filler: Arc<SyntheticFiller>,
}

impl fmt::Debug for ItineraryGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItineraryGenerator")
            .field("ai_configured", &self.inference.is_some())
            .finish_non_exhaustive()
    }
}

impl ItineraryGenerator {
    /// Create a generator; `None` means templates only
    pub fn new(inference: Option<Arc<dyn InferencePort>>, filler: Arc<SyntheticFiller>) -> Self {
        Self { inference, filler }
    }

    /// Whether an AI backend is configured
    pub fn has_inference(&self) -> bool {
        self.inference.is_some()
    }

    /// Generate an itinerary for `request`
    ///
    /// Falls back to the mood template on any error; the reason is recorded
    /// in the itinerary's [`ItinerarySource`].
    #[instrument(skip(self, request), fields(mood = %request.mood(), location = %request.location()))]
    pub async fn generate(&self, request: &TripRequest) -> GeneratedItinerary {
        let (content, source) = match self.generate_with_ai(request).await {
            Ok((content, model)) => {
                info!(%model, places = content.places.len(), "AI itinerary generated");
                (content, ItinerarySource::Ai { model })
            },
            Err(e) => {
                warn!(error = %e, "AI itinerary unavailable, using mood template");
                (
                    templates::fallback_content(request, self.filler.distance_label()),
                    ItinerarySource::Fallback {
                        reason: e.to_string(),
                    },
                )
            },
        };

        GeneratedItinerary::stamp(request.clone(), content, source)
    }

    async fn generate_with_ai(
        &self,
        request: &TripRequest,
    ) -> Result<(ItineraryContent, String), ApplicationError> {
        let inference = self.inference.as_ref().ok_or_else(|| {
            ApplicationError::Configuration("no AI credential configured".to_string())
        })?;

        let prompt = prompt::build_prompt(request);
        let result = inference.generate(&prompt).await?;
        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = result.latency_ms,
            response_len = result.content.len(),
            "AI response received"
        );

        let content = parser::parse_itinerary(&result.content, request, || {
            self.filler.distance_label()
        })
        .inspect_err(|e| debug!(error = %e, raw = %result.content, "Unusable AI response"))?;

        Ok((content, result.model))
    }

    /// Check the AI backend
    pub async fn health(&self) -> GeneratorHealth {
        let Some(inference) = &self.inference else {
            return GeneratorHealth::Mock;
        };
        if inference.is_healthy().await {
            GeneratorHealth::Healthy {
                model: inference.current_model(),
            }
        } else {
            GeneratorHealth::Unhealthy {
                reason: "AI backend health check failed".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::{BudgetTier, MAX_PLACES, MIN_PLACES, Mood};
    use serde_json::json;

    use super::*;
    use crate::ports::{InferenceResult, MockInferencePort};

    fn request(mood: Mood, location: &str) -> TripRequest {
        TripRequest::new(mood, location, 6, BudgetTier::new(2).unwrap()).unwrap()
    }

    fn result(content: String) -> InferenceResult {
        InferenceResult {
            content,
            model: "gemini-pro".to_string(),
            tokens_used: Some(321),
            latency_ms: 850,
        }
    }

    fn generator(mock: Option<MockInferencePort>) -> ItineraryGenerator {
        ItineraryGenerator::new(
            mock.map(|m| Arc::new(m) as Arc<dyn InferencePort>),
            Arc::new(SyntheticFiller::seeded(7)),
        )
    }

    fn ai_json(n: usize) -> String {
        let places: Vec<_> = (0..n)
            .map(|i| json!({"name": format!("Stop {i}"), "type": "Cafe"}))
            .collect();
        json!({"title": "Lisbon Lights", "description": "Great", "itinerary": places}).to_string()
    }

    #[tokio::test]
    async fn chill_paris_without_ai_uses_template() {
        let itinerary = generator(None)
            .generate(&request(Mood::Chill, "Paris"))
            .await;

        assert!(itinerary.title.contains("Peaceful Relaxation Day"));
        assert!(itinerary.title.contains("Paris"));
        assert_eq!(itinerary.places.len(), 4);
        assert_eq!(itinerary.places[0].name, "Botanical Garden");
        assert!(itinerary.source.is_fallback());
        assert!(itinerary.total_distance_label.ends_with(" km"));
        assert_eq!(itinerary.request.location(), "Paris");
    }

    #[tokio::test]
    async fn unrecognized_mood_label_gets_fun_template() {
        let mood = Mood::from_label("melancholic");
        let itinerary = generator(None)
            .generate(&request(mood, "Denver"))
            .await;
        assert_eq!(itinerary.title, "Epic Adventure Day in Denver");
    }

    #[tokio::test]
    async fn ai_response_is_used() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate()
            .withf(|prompt| prompt.contains("Lisbon") && prompt.contains("Return ONLY the JSON object"))
            .times(1)
            .returning(|_| Ok(result(format!("```json\n{}\n```", ai_json(5)))));

        let itinerary = generator(Some(mock))
            .generate(&request(Mood::Romantic, "Lisbon"))
            .await;

        assert_eq!(itinerary.title, "Lisbon Lights");
        assert_eq!(itinerary.places.len(), 5);
        assert_eq!(
            itinerary.source,
            ItinerarySource::Ai {
                model: "gemini-pro".to_string()
            }
        );
    }

    #[tokio::test]
    async fn transport_error_falls_back() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate()
            .returning(|_| Err(ApplicationError::ExternalService("connection reset".to_string())));

        let itinerary = generator(Some(mock))
            .generate(&request(Mood::Nature, "Seattle"))
            .await;

        assert_eq!(itinerary.title, "Nature Explorer Day in Seattle");
        match itinerary.source {
            ItinerarySource::Fallback { reason } => assert!(reason.contains("connection reset")),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_output_falls_back() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate()
            .returning(|_| Ok(result("I'd love to help plan your trip!".to_string())));

        let itinerary = generator(Some(mock))
            .generate(&request(Mood::Fun, "Austin"))
            .await;
        assert!(itinerary.source.is_fallback());
        assert_eq!(itinerary.places.len(), 4);
    }

    #[tokio::test]
    async fn too_few_places_falls_back() {
        let mut mock = MockInferencePort::new();
        mock.expect_generate()
            .returning(|_| Ok(result(ai_json(2))));

        let itinerary = generator(Some(mock))
            .generate(&request(Mood::Fun, "Austin"))
            .await;
        assert!(itinerary.source.is_fallback());
    }

    #[tokio::test]
    async fn place_count_always_in_bounds() {
        for n in [0, 3, 4, 6, 10] {
            let mut mock = MockInferencePort::new();
            mock.expect_generate()
                .returning(move |_| Ok(result(ai_json(n))));
            let itinerary = generator(Some(mock))
                .generate(&request(Mood::Chill, "Boston"))
                .await;
            assert!((MIN_PLACES..=MAX_PLACES).contains(&itinerary.places.len()));
            assert!(!itinerary.title.is_empty());
            assert!(!itinerary.description.is_empty());
        }
    }

    #[tokio::test]
    async fn health_reports_mode() {
        assert_eq!(generator(None).health().await, GeneratorHealth::Mock);

        let mut healthy = MockInferencePort::new();
        healthy.expect_is_healthy().returning(|| true);
        healthy
            .expect_current_model()
            .returning(|| "gemini-pro".to_string());
        assert_eq!(
            generator(Some(healthy)).health().await,
            GeneratorHealth::Healthy {
                model: "gemini-pro".to_string()
            }
        );

        let mut failing = MockInferencePort::new();
        failing.expect_is_healthy().returning(|| false);
        assert_eq!(generator(Some(failing)).health().await.mode(), "unhealthy");
    }

    #[test]
    fn debug_hides_backend() {
        let debug = format!("{:?}", generator(None));
        assert!(debug.contains("ai_configured: false"));
    }
}
