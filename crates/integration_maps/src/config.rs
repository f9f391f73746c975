//! Backend configuration for the maps integration

use serde::{Deserialize, Serialize};

/// Identifying user agent; Nominatim and Wikipedia reject anonymous clients
pub const DEFAULT_USER_AGENT: &str = "MoodYatra/1.0 (contact@moodyatra.com)";

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_nominatim_base_url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum spacing between requests in milliseconds
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Optional country code filter (e.g. "fr")
    #[serde(default)]
    pub country_filter: Option<String>,
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_min_interval_ms() -> u64 {
    1000
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_nominatim_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            min_interval_ms: default_min_interval_ms(),
            cache_ttl_hours: default_cache_ttl_hours(),
            country_filter: None,
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            cache_ttl_hours: 0,
            ..Default::default()
        }
    }
}

/// Configuration for the Google Maps web services (Geocoding + Places)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleMapsConfig {
    /// Base URL for the Google Maps APIs
    #[serde(default = "default_google_base_url")]
    pub base_url: String,

    /// API key; Google backends are only used when this is set
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_google_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            base_url: default_google_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GoogleMapsConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Configuration for the OpenTripMap POI catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenTripMapConfig {
    /// Base URL for the OpenTripMap API
    #[serde(default = "default_opentripmap_base_url")]
    pub base_url: String,

    /// API key; the catalog is skipped when this is unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// Response language
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_opentripmap_base_url() -> String {
    "https://api.opentripmap.com".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

impl Default for OpenTripMapConfig {
    fn default() -> Self {
        Self {
            base_url: default_opentripmap_base_url(),
            api_key: None,
            lang: default_lang(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OpenTripMapConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Configuration for Wikipedia page summaries (thumbnail lookup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikipediaConfig {
    /// Whether thumbnail lookup is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// REST API root, e.g. `https://en.wikipedia.org/api/rest_v1`
    #[serde(default = "default_wikipedia_base_url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_wikipedia_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_true() -> bool {
    true
}

fn default_wikipedia_base_url() -> String {
    "https://en.wikipedia.org/api/rest_v1".to_string()
}

const fn default_wikipedia_timeout_secs() -> u64 {
    5
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_wikipedia_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_wikipedia_timeout_secs(),
        }
    }
}

/// Aggregate configuration for every geodata backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Nominatim (used when no Google key is configured)
    #[serde(default)]
    pub nominatim: NominatimConfig,

    /// Google Maps Geocoding + Places
    #[serde(default)]
    pub google: GoogleMapsConfig,

    /// OpenTripMap POI catalog
    #[serde(default)]
    pub opentripmap: OpenTripMapConfig,

    /// Wikipedia thumbnails
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
}

impl MapsConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [
            ("nominatim.base_url", &self.nominatim.base_url),
            ("google.base_url", &self.google.base_url),
            ("opentripmap.base_url", &self.opentripmap.base_url),
            ("wikipedia.base_url", &self.wikipedia.base_url),
        ] {
            if url::Url::parse(url).is_err() {
                return Err(format!("{name} is not a valid URL: {url}"));
            }
        }
        if self.nominatim.user_agent.trim().is_empty() {
            return Err("nominatim.user_agent must not be empty".to_string());
        }
        if self.nominatim.min_interval_ms == 0 {
            return Err("nominatim.min_interval_ms must be greater than 0".to_string());
        }
        if self.nominatim.timeout_secs == 0
            || self.google.timeout_secs == 0
            || self.opentripmap.timeout_secs == 0
            || self.wikipedia.timeout_secs == 0
        {
            return Err("timeouts must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Keyless configuration pointing every backend at `base_url`
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            nominatim: NominatimConfig::for_testing(base_url),
            google: GoogleMapsConfig {
                base_url: base_url.to_string(),
                ..Default::default()
            },
            opentripmap: OpenTripMapConfig {
                base_url: base_url.to_string(),
                ..Default::default()
            },
            wikipedia: WikipediaConfig {
                base_url: base_url.to_string(),
                ..Default::default()
            },
        }
    }
}
