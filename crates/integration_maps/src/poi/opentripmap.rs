//! OpenTripMap client
//!
//! Radius search over the OpenTripMap catalog. OpenTripMap "rate" is a
//! popularity rank 1-3 (optionally suffixed `h` for heritage); it is mapped to
//! a 0-5 rating as `2 + rate`, with rank 0 treated as unrated.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{PoiCandidate, PoiCatalog};
use crate::config::OpenTripMapConfig;
use crate::error::MapsError;

/// OpenTripMap radius-search client
#[derive(Debug)]
pub struct OpenTripMapClient {
    client: Client,
    base_url: String,
    lang: String,
    api_key: SecretString,
    timeout_secs: u64,
}

impl OpenTripMapClient {
    /// Create a new OpenTripMap client
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::ConfigurationMissing`] without an API key, or an
    /// error if the HTTP client cannot be initialized.
    pub fn new(config: &OpenTripMapConfig) -> Result<Self, MapsError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| MapsError::ConfigurationMissing("opentripmap.api_key".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MapsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            lang: config.lang.clone(),
            api_key: SecretString::from(api_key.to_string()),
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl PoiCatalog for OpenTripMapClient {
    #[instrument(skip(self))]
    async fn nearby(
        &self,
        location: GeoLocation,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<PoiCandidate>, MapsError> {
        let url = format!("{}/0.1/{}/places/radius", self.base_url, self.lang);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("radius", radius_m.to_string()),
                ("lon", location.longitude().to_string()),
                ("lat", location.latitude().to_string()),
                ("limit", limit.to_string()),
                ("format", "json".to_string()),
            ])
            .query(&[("apikey", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| MapsError::from_transport(&e, self.timeout_secs))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(MapsError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(MapsError::RequestFailed(format!("HTTP {status}")));
        }

        let features: Vec<OtmFeature> = response
            .json()
            .await
            .map_err(|e| MapsError::ParseError(e.to_string()))?;

        let candidates: Vec<PoiCandidate> = features
            .into_iter()
            .filter(|f| !f.name.trim().is_empty())
            .map(OtmFeature::into_candidate)
            .collect();
        debug!(count = candidates.len(), "OpenTripMap candidates");
        Ok(candidates)
    }

    fn provider_name(&self) -> &'static str {
        "opentripmap"
    }
}

#[derive(Debug, Deserialize)]
struct OtmFeature {
    #[serde(default)]
    xid: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    rate: Value,
    #[serde(default)]
    kinds: String,
}

impl OtmFeature {
    fn into_candidate(self) -> PoiCandidate {
        PoiCandidate {
            rating: rating_from_rate(&self.rate),
            kinds: self
                .kinds
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ToString::to_string)
                .collect(),
            external_id: self.xid,
            name: self.name,
            ..Default::default()
        }
    }
}

/// Convert an OpenTripMap `rate` (number, or string like `"3h"`) to a 0-5 rating
fn rating_from_rate(rate: &Value) -> Option<f32> {
    let rank = match rate {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .ok()?,
        _ => return None,
    };
    if rank == 0 {
        return None;
    }
    let rank = u8::try_from(rank.min(3)).unwrap_or(3);
    Some(2.0 + f32::from(rank))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rate_mapping() {
        assert_eq!(rating_from_rate(&json!(0)), None);
        assert_eq!(rating_from_rate(&json!(1)), Some(3.0));
        assert_eq!(rating_from_rate(&json!(3)), Some(5.0));
        assert_eq!(rating_from_rate(&json!(7)), Some(5.0));
        assert_eq!(rating_from_rate(&json!("2h")), Some(4.0));
        assert_eq!(rating_from_rate(&json!("h")), None);
        assert_eq!(rating_from_rate(&Value::Null), None);
    }

    #[test]
    fn feature_into_candidate_splits_kinds() {
        let feature: OtmFeature = serde_json::from_value(json!({
            "xid": "W123",
            "name": "Jardin des Plantes",
            "rate": 3,
            "kinds": "gardens_and_parks, natural,"
        }))
        .unwrap();
        let candidate = feature.into_candidate();
        assert_eq!(candidate.name, "Jardin des Plantes");
        assert_eq!(candidate.external_id.as_deref(), Some("W123"));
        assert_eq!(candidate.kinds, vec!["gardens_and_parks", "natural"]);
        assert_eq!(candidate.rating, Some(5.0));
        assert_eq!(candidate.review_count, None);
    }

    #[test]
    fn requires_api_key() {
        assert!(matches!(
            OpenTripMapClient::new(&OpenTripMapConfig::default()),
            Err(MapsError::ConfigurationMissing(_))
        ));
    }
}
