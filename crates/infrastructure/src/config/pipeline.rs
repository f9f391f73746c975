//! Enrichment pipeline configuration.

use std::time::Duration;

use application::{DEFAULT_POI_LIMIT, DEFAULT_POI_RADIUS_M};
use serde::{Deserialize, Serialize};

/// Enrichment pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pause between consecutive places when the geocoder is throttled
    #[serde(default = "default_inter_place_delay_ms")]
    pub inter_place_delay_ms: u64,

    /// Radius of the nearby POI search in meters
    #[serde(default = "default_poi_radius_m")]
    pub poi_radius_m: u32,

    /// Maximum POI candidates considered per place
    #[serde(default = "default_poi_limit")]
    pub poi_limit: u32,
}

const fn default_inter_place_delay_ms() -> u64 {
    1000
}

const fn default_poi_radius_m() -> u32 {
    DEFAULT_POI_RADIUS_M
}

const fn default_poi_limit() -> u32 {
    DEFAULT_POI_LIMIT
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inter_place_delay_ms: default_inter_place_delay_ms(),
            poi_radius_m: default_poi_radius_m(),
            poi_limit: default_poi_limit(),
        }
    }
}

impl PipelineConfig {
    /// Inter-place delay as a [`Duration`]
    #[must_use]
    pub const fn inter_place_delay(&self) -> Duration {
        Duration::from_millis(self.inter_place_delay_ms)
    }

    /// Validate the pipeline section
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.poi_radius_m == 0 || self.poi_radius_m > 50_000 {
            return Err(format!(
                "pipeline.poi_radius_m must be between 1 and 50000, got {}",
                self.poi_radius_m
            ));
        }
        if self.poi_limit == 0 || self.poi_limit > 50 {
            return Err(format!(
                "pipeline.poi_limit must be between 1 and 50, got {}",
                self.poi_limit
            ));
        }
        Ok(())
    }
}
