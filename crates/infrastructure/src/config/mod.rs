//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `pipeline`: enrichment pacing and POI search
//! - `database`: SQLite database settings
//!
//! The `ai` and `maps` sections reuse the config types of `ai_core` and
//! `integration_maps` directly.

mod database;
mod pipeline;
mod server;

use ai_core::InferenceConfig;
use integration_maps::MapsConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use database::DatabaseConfig;
pub use pipeline::PipelineConfig;
pub use server::ServerConfig;

/// Prefix for environment overrides, e.g. `MOODYATRA_SERVER__PORT`
pub const ENV_PREFIX: &str = "MOODYATRA";

/// Conventional variable for the Gemini API key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Conventional variable for the Google Maps API key
pub const GOOGLE_MAPS_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Conventional variable for the OpenTripMap API key
pub const OPENTRIPMAP_API_KEY_VAR: &str = "OPENTRIPMAP_API_KEY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Generative-AI backend; without an API key itineraries come from templates
    #[serde(default)]
    pub ai: InferenceConfig,

    /// Geocoding, POI and thumbnail backends
    #[serde(default)]
    pub maps: MapsConfig,

    /// Enrichment pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration using `file` (without extension) as the optional file source
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or deserialized.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., MOODYATRA_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_credential_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Fill unset credentials from their conventional variables
    ///
    /// `lookup` resolves a variable name; configured values are never replaced.
    pub fn apply_credential_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fill = |slot: &mut Option<String>, var: &str| {
            let unset = slot.as_deref().is_none_or(|v| v.trim().is_empty());
            if unset {
                if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
                    debug!(var, "Credential loaded from environment");
                    *slot = Some(value);
                }
            }
        };

        fill(&mut self.ai.api_key, GEMINI_API_KEY_VAR);
        fill(&mut self.maps.google.api_key, GOOGLE_MAPS_API_KEY_VAR);
        fill(&mut self.maps.opentripmap.api_key, OPENTRIPMAP_API_KEY_VAR);
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.ai.validate()?;
        self.maps.validate()?;
        self.pipeline.validate()?;
        self.database.validate()
    }

    /// Configuration for tests: in-memory database, no credentials, no pacing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            pipeline: PipelineConfig {
                inter_place_delay_ms: 0,
                ..PipelineConfig::default()
            },
            database: DatabaseConfig::in_memory(),
            ..Self::default()
        }
    }
}
