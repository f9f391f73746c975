//! Gemini inference adapter - Implements InferencePort using ai_core

use std::time::Instant;

use ai_core::{
    GeminiInferenceEngine, InferenceConfig, InferenceEngine, InferenceError, InferenceRequest,
};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Adapter for the Gemini generative language API
#[derive(Debug)]
pub struct GeminiInferenceAdapter<E = GeminiInferenceEngine> {
    engine: E,
}

impl GeminiInferenceAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when no API key is set.
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = GeminiInferenceEngine::new(config).map_err(Self::map_error)?;
        Ok(Self { engine })
    }
}

impl<E: InferenceEngine> GeminiInferenceAdapter<E> {
    /// Wrap an already constructed engine
    pub const fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::MissingApiKey => ApplicationError::Configuration(e.to_string()),
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::InvalidResponse(msg) => ApplicationError::Parse(msg),
            InferenceError::ConnectionFailed(_)
            | InferenceError::Timeout(_)
            | InferenceError::ServerError(_) => ApplicationError::ExternalService(e.to_string()),
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl<E: InferenceEngine> InferencePort for GeminiInferenceAdapter<E> {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let response = self
            .engine
            .generate(InferenceRequest::simple(prompt))
            .await
            .map_err(Self::map_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms = latency_ms,
            "Inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        match self.engine.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Inference health check failed");
                false
            },
        }
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}

#[cfg(test)]
mod tests {
    use ai_core::{InferenceResponse, TokenUsage};

    use super::*;

    #[derive(Debug)]
    struct ScriptedEngine {
        reply: fn() -> Result<InferenceResponse, InferenceError>,
        healthy: fn() -> Result<bool, InferenceError>,
    }

    #[async_trait]
    impl InferenceEngine for ScriptedEngine {
        async fn generate(
            &self,
            _request: InferenceRequest,
        ) -> Result<InferenceResponse, InferenceError> {
            (self.reply)()
        }

        async fn health_check(&self) -> Result<bool, InferenceError> {
            (self.healthy)()
        }

        fn default_model(&self) -> &str {
            "gemini-test"
        }
    }

    fn ok_reply() -> Result<InferenceResponse, InferenceError> {
        Ok(InferenceResponse {
            content: "{\"title\":\"x\"}".to_string(),
            model: "gemini-test".to_string(),
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 32,
                total_tokens: 42,
            }),
            finish_reason: Some("STOP".to_string()),
        })
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let err = GeminiInferenceAdapter::new(InferenceConfig::default()).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[tokio::test]
    async fn generate_maps_response() {
        let adapter = GeminiInferenceAdapter::with_engine(ScriptedEngine {
            reply: ok_reply,
            healthy: || Ok(true),
        });

        let result = adapter.generate("plan a day").await.unwrap();
        assert_eq!(result.model, "gemini-test");
        assert_eq!(result.tokens_used, Some(42));
        assert!(adapter.is_healthy().await);
        assert_eq!(adapter.current_model(), "gemini-test");
    }

    #[tokio::test]
    async fn error_categories_survive() {
        let adapter = GeminiInferenceAdapter::with_engine(ScriptedEngine {
            reply: || Err(InferenceError::InvalidResponse("no candidates".into())),
            healthy: || Err(InferenceError::ConnectionFailed("refused".into())),
        });
        assert!(matches!(
            adapter.generate("x").await,
            Err(ApplicationError::Parse(_))
        ));
        assert!(!adapter.is_healthy().await);

        let adapter = GeminiInferenceAdapter::with_engine(ScriptedEngine {
            reply: || Err(InferenceError::Timeout(30_000)),
            healthy: || Ok(false),
        });
        let err = adapter.generate("x").await.unwrap_err();
        assert!(err.is_retryable());
    }
}
