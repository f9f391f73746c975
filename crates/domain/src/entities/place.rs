//! Place records: the AI-produced stub, the partial enrichment draft and the
//! fully enriched place.

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::GeoLocation};

/// Category used when a stub omits its type
pub const DEFAULT_PLACE_KIND: &str = "Attraction";

fn default_kind() -> String {
    DEFAULT_PLACE_KIND.to_string()
}

/// A place as described by the itinerary generator, before any geodata lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceStub {
    pub name: String,
    /// Free-text category ("Park", "Museum", ...)
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Display start time, e.g. "10:00 AM"
    #[serde(default)]
    pub time: String,
    #[serde(rename = "duration", default)]
    pub duration_label: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "cost", default)]
    pub cost_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

impl PlaceStub {
    /// Create a stub with only a name and category
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            time: String::new(),
            duration_label: String::new(),
            description: String::new(),
            cost_label: String::new(),
            address: None,
            tips: None,
        }
    }

    /// Set the street address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Partially known enrichment data for one place.
///
/// Every field is optional. Drafts from different sources are merged with
/// [`PlaceDraft::coalesce`], and whatever is still missing afterwards comes from a
/// [`Backfill`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDraft {
    pub address: Option<String>,
    pub location: Option<GeoLocation>,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub image_url: Option<String>,
    pub external_id: Option<String>,
    pub opening_hours: Option<Vec<String>>,
    pub price_level: Option<u8>,
}

impl PlaceDraft {
    /// Draft holding whatever the stub already knows
    #[must_use]
    pub fn from_stub(stub: &PlaceStub) -> Self {
        Self {
            address: stub.address.clone(),
            ..Self::default()
        }
    }

    /// Field-by-field merge: a usable value in `self` wins, otherwise the value
    /// from `fallback` is taken.
    ///
    /// Blank strings, empty lists, ratings outside 0.0..=5.0 and price levels
    /// above 4 count as missing.
    #[must_use]
    pub fn coalesce(self, fallback: Self) -> Self {
        Self {
            address: non_blank(self.address).or_else(|| non_blank(fallback.address)),
            location: self.location.or(fallback.location),
            rating: valid_rating(self.rating).or_else(|| valid_rating(fallback.rating)),
            review_count: self.review_count.or(fallback.review_count),
            image_url: non_blank(self.image_url).or_else(|| non_blank(fallback.image_url)),
            external_id: non_blank(self.external_id).or_else(|| non_blank(fallback.external_id)),
            opening_hours: non_empty(self.opening_hours)
                .or_else(|| non_empty(fallback.opening_hours)),
            price_level: valid_price_level(self.price_level)
                .or_else(|| valid_price_level(fallback.price_level)),
        }
    }

    /// Names of the required fields that are still unset
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if non_blank(self.address.clone()).is_none() {
            missing.push("address");
        }
        if self.location.is_none() {
            missing.push("location");
        }
        if valid_rating(self.rating).is_none() {
            missing.push("rating");
        }
        if self.review_count.is_none() {
            missing.push("review_count");
        }
        if non_blank(self.image_url.clone()).is_none() {
            missing.push("image_url");
        }
        missing
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn non_empty(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value.filter(|v| !v.is_empty())
}

fn valid_rating(value: Option<f32>) -> Option<f32> {
    value.filter(|r| r.is_finite() && (0.0..=5.0).contains(r))
}

fn valid_price_level(value: Option<u8>) -> Option<u8> {
    value.filter(|p| *p <= 4)
}

/// Synthetic values for every required enrichment field
#[derive(Debug, Clone, PartialEq)]
pub struct Backfill {
    pub address: String,
    pub location: GeoLocation,
    pub rating: f32,
    pub review_count: u32,
    pub image_url: String,
}

/// A place with every display field resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPlace {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
    #[serde(rename = "duration")]
    pub duration_label: String,
    pub description: String,
    #[serde(rename = "cost")]
    pub cost_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    pub address: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    /// 0.0 to 5.0, one decimal
    pub rating: f32,
    #[serde(rename = "reviews")]
    pub review_count: u32,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
}

impl EnrichedPlace {
    /// Resolve a stub against a merged draft; gaps are filled from `backfill`
    #[must_use]
    pub fn from_draft(stub: PlaceStub, draft: PlaceDraft, backfill: Backfill) -> Self {
        let merged = draft.coalesce(PlaceDraft {
            address: Some(backfill.address),
            location: Some(backfill.location),
            rating: Some(backfill.rating),
            review_count: Some(backfill.review_count),
            image_url: Some(backfill.image_url),
            ..PlaceDraft::default()
        });
        // coalesce with a complete fallback leaves no required field empty
        let location = merged.location.unwrap_or(backfill.location);

        Self {
            name: stub.name,
            kind: stub.kind,
            time: stub.time,
            duration_label: stub.duration_label,
            description: stub.description,
            cost_label: stub.cost_label,
            tips: stub.tips,
            address: merged.address.unwrap_or_default(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            rating: round_rating(merged.rating.unwrap_or(backfill.rating)),
            review_count: merged.review_count.unwrap_or(backfill.review_count),
            image_url: merged.image_url.unwrap_or_default(),
            external_id: merged.external_id,
            opening_hours: merged.opening_hours,
            price_level: merged.price_level,
        }
    }

    /// Check the display invariants of a place received from outside the pipeline
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("place name must not be empty"));
        }
        GeoLocation::new(self.latitude, self.longitude)?;
        if valid_rating(Some(self.rating)).is_none() {
            return Err(DomainError::validation(format!(
                "rating of {} must be between 0.0 and 5.0",
                self.name
            )));
        }
        if self.address.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "address of {} must not be empty",
                self.name
            )));
        }
        if self.image_url.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "image of {} must not be empty",
                self.name
            )));
        }
        if valid_price_level(self.price_level) != self.price_level {
            return Err(DomainError::validation(format!(
                "price level of {} must be at most 4",
                self.name
            )));
        }
        Ok(())
    }

    /// Coordinates as a value object
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        GeoLocation::new_unchecked(self.latitude, self.longitude)
    }

    /// The stub part of this place, for re-enrichment
    #[must_use]
    pub fn to_stub(&self) -> PlaceStub {
        PlaceStub {
            name: self.name.clone(),
            kind: self.kind.clone(),
            time: self.time.clone(),
            duration_label: self.duration_label.clone(),
            description: self.description.clone(),
            cost_label: self.cost_label.clone(),
            address: Some(self.address.clone()),
            tips: self.tips.clone(),
        }
    }

    /// Everything this place already knows, as a draft
    #[must_use]
    pub fn to_draft(&self) -> PlaceDraft {
        PlaceDraft {
            address: Some(self.address.clone()),
            location: Some(self.location()),
            rating: Some(self.rating),
            review_count: Some(self.review_count),
            image_url: Some(self.image_url.clone()),
            external_id: self.external_id.clone(),
            opening_hours: self.opening_hours.clone(),
            price_level: self.price_level,
        }
    }
}

/// Clamp to 0.0..=5.0 and round to one decimal
#[must_use]
pub fn round_rating(rating: f32) -> f32 {
    (rating.clamp(0.0, 5.0) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backfill() -> Backfill {
        Backfill {
            address: "Botanical Garden, Paris".to_string(),
            location: GeoLocation::new_unchecked(48.85, 2.35),
            rating: 3.7,
            review_count: 120,
            image_url: "https://picsum.photos/300/200?random=7".to_string(),
        }
    }

    fn provider_draft() -> PlaceDraft {
        PlaceDraft {
            address: Some("Jardin des Plantes, 75005 Paris".to_string()),
            location: Some(GeoLocation::new_unchecked(48.8439, 2.3596)),
            rating: Some(4.6),
            review_count: None,
            image_url: None,
            external_id: Some("node/123".to_string()),
            opening_hours: None,
            price_level: Some(0),
        }
    }

    #[test]
    fn coalesce_prefers_primary() {
        let existing = PlaceDraft {
            address: Some("old address".to_string()),
            rating: Some(3.1),
            review_count: Some(10),
            ..PlaceDraft::default()
        };
        let merged = provider_draft().coalesce(existing);
        assert_eq!(merged.address.as_deref(), Some("Jardin des Plantes, 75005 Paris"));
        assert_eq!(merged.rating, Some(4.6));
        assert_eq!(merged.review_count, Some(10));
    }

    #[test]
    fn coalesce_treats_blank_and_invalid_as_missing() {
        let primary = PlaceDraft {
            address: Some("  ".to_string()),
            rating: Some(7.5),
            price_level: Some(9),
            opening_hours: Some(Vec::new()),
            ..PlaceDraft::default()
        };
        let fallback = PlaceDraft {
            address: Some("fallback".to_string()),
            rating: Some(4.0),
            price_level: Some(2),
            opening_hours: Some(vec!["Monday: 9-5".to_string()]),
            ..PlaceDraft::default()
        };
        let merged = primary.coalesce(fallback);
        assert_eq!(merged.address.as_deref(), Some("fallback"));
        assert_eq!(merged.rating, Some(4.0));
        assert_eq!(merged.price_level, Some(2));
        assert_eq!(merged.opening_hours.map(|h| h.len()), Some(1));
    }

    #[test]
    fn missing_fields_lists_required_gaps() {
        let draft = PlaceDraft {
            rating: Some(4.0),
            ..PlaceDraft::default()
        };
        assert_eq!(
            draft.missing_fields(),
            vec!["address", "location", "review_count", "image_url"]
        );
    }

    #[test]
    fn from_draft_fills_gaps_from_backfill() {
        let stub = PlaceStub::new("Botanical Garden", "Park");
        let place = EnrichedPlace::from_draft(stub, provider_draft(), backfill());
        assert_eq!(place.address, "Jardin des Plantes, 75005 Paris");
        assert!((place.latitude - 48.8439).abs() < 1e-9);
        assert!((place.rating - 4.6).abs() < f32::EPSILON);
        assert_eq!(place.review_count, 120);
        assert_eq!(place.image_url, "https://picsum.photos/300/200?random=7");
        assert_eq!(place.external_id.as_deref(), Some("node/123"));
        assert_eq!(place.price_level, Some(0));
    }

    #[test]
    fn from_empty_draft_is_fully_synthetic() {
        let stub = PlaceStub::new("Somewhere", "Cafe");
        let place = EnrichedPlace::from_draft(stub, PlaceDraft::default(), backfill());
        assert_eq!(place.address, "Botanical Garden, Paris");
        assert!((place.rating - 3.7).abs() < f32::EPSILON);
        assert!(place.external_id.is_none());
    }

    #[test]
    fn draft_roundtrip_preserves_fields() {
        let place = EnrichedPlace::from_draft(
            PlaceStub::new("Botanical Garden", "Park"),
            provider_draft(),
            backfill(),
        );
        let again = EnrichedPlace::from_draft(place.to_stub(), place.to_draft(), backfill());
        assert_eq!(place, again);
    }

    #[test]
    fn validate_accepts_enriched_place() {
        let place = EnrichedPlace::from_draft(
            PlaceStub::new("Botanical Garden", "Park"),
            provider_draft(),
            backfill(),
        );
        assert!(place.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let place = EnrichedPlace::from_draft(
            PlaceStub::new("Botanical Garden", "Park"),
            provider_draft(),
            backfill(),
        );

        let mut bad_rating = place.clone();
        bad_rating.rating = 42.0;
        assert!(bad_rating.validate().is_err());

        let mut bad_lat = place.clone();
        bad_lat.latitude = 500.0;
        assert!(matches!(
            bad_lat.validate(),
            Err(DomainError::InvalidCoordinates { .. })
        ));

        let mut no_image = place.clone();
        no_image.image_url = String::new();
        assert!(no_image.validate().is_err());

        let mut blank_address = place.clone();
        blank_address.address = "  ".to_string();
        assert!(blank_address.validate().is_err());

        let mut bad_price = place;
        bad_price.price_level = Some(5);
        assert!(bad_price.validate().is_err());
    }

    #[test]
    fn rating_is_rounded_and_clamped() {
        assert!((round_rating(4.26) - 4.3).abs() < f32::EPSILON);
        assert!((round_rating(9.0) - 5.0).abs() < f32::EPSILON);
        assert!(round_rating(-1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn stub_deserializes_with_wire_names_and_defaults() {
        let stub: PlaceStub = serde_json::from_str(
            r#"{"name":"Louvre","duration":"2 hours","cost":"$17","tips":"Go early"}"#,
        )
        .unwrap();
        assert_eq!(stub.kind, DEFAULT_PLACE_KIND);
        assert_eq!(stub.duration_label, "2 hours");
        assert_eq!(stub.cost_label, "$17");
        assert_eq!(stub.tips.as_deref(), Some("Go early"));
        assert!(stub.address.is_none());
    }

    #[test]
    fn enriched_place_uses_short_wire_names() {
        let place = EnrichedPlace::from_draft(
            PlaceStub::new("Botanical Garden", "Park"),
            provider_draft(),
            backfill(),
        );
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["type"], "Park");
        assert!(json["lat"].is_number());
        assert_eq!(json["reviews"], 120);
        assert!(json["image"].is_string());
        assert_eq!(json["externalId"], "node/123");
    }
}
