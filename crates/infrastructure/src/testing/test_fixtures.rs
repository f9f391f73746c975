//! Test fixtures for trip persistence testing.
//!
//! Provides a builder for enriched trips without running the pipeline.

use chrono::{DateTime, Utc};
use domain::{
    Backfill, BudgetTier, EnrichedPlace, EnrichedTrip, GeneratedItinerary, GeoLocation,
    ItineraryContent, ItinerarySource, Mood, PlaceDraft, PlaceStub, Preference, Preferences,
    TripRequest,
};

/// Builder for creating test trips.
#[derive(Debug, Clone)]
pub struct TestTrip {
    title: String,
    description: String,
    location: String,
    mood: Mood,
    place_names: Vec<String>,
    preferences: Vec<Preference>,
    is_public: bool,
    created_at: Option<DateTime<Utc>>,
}

impl TestTrip {
    /// Create a new test trip builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Peaceful Relaxation Day in Paris".to_string(),
            description: "A calm walk through Paris.".to_string(),
            location: "Paris".to_string(),
            mood: Mood::Chill,
            place_names: [
                "Jardin du Luxembourg",
                "Shakespeare and Company",
                "Musée d'Orsay",
                "Seine Cruise",
            ]
            .map(String::from)
            .to_vec(),
            preferences: Vec::new(),
            is_public: true,
            created_at: None,
        }
    }

    /// Set the trip title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the trip description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the requested location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the mood.
    #[must_use]
    pub const fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = mood;
        self
    }

    /// Add a preference.
    #[must_use]
    pub fn with_preference(mut self, preference: Preference) -> Self {
        self.preferences.push(preference);
        self
    }

    /// Mark the trip private.
    #[must_use]
    pub const fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Set the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Build the trip.
    ///
    /// # Panics
    ///
    /// Panics if the configured request is invalid.
    #[must_use]
    pub fn build(self) -> EnrichedTrip {
        #[allow(clippy::expect_used)]
        let request = TripRequest::new(
            self.mood,
            &self.location,
            6,
            BudgetTier::new(2).expect("valid tier"),
        )
        .expect("valid request")
        .with_preferences(self.preferences.into_iter().collect::<Preferences>());

        let stubs: Vec<PlaceStub> = self
            .place_names
            .iter()
            .map(|name| {
                PlaceStub::new(name, "Attraction")
                    .with_address(format!("{name}, {}", self.location))
            })
            .collect();

        let content = ItineraryContent {
            title: self.title,
            description: self.description,
            places: stubs.clone(),
            total_distance_label: "7.5 km".to_string(),
            estimated_cost_label: "$30 - $75".to_string(),
            best_time_to_start: "9:00 AM".to_string(),
            transportation_tips: "Walk.".to_string(),
            weather_notes: "Bring an umbrella.".to_string(),
            additional_tips: "Book ahead.".to_string(),
        };
        let mut itinerary = GeneratedItinerary::stamp(
            request,
            content,
            ItinerarySource::Fallback {
                reason: "test".to_string(),
            },
        );
        if let Some(at) = self.created_at {
            itinerary.created_at = at;
        }

        let centre = GeoLocation::city_centroid(&self.location);
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let places = stubs
            .into_iter()
            .enumerate()
            .map(|(i, stub)| {
                let backfill = Backfill {
                    address: String::new(),
                    location: centre.offset(i as f64 * 0.005, 0.0),
                    rating: 4.2,
                    review_count: 120 + i as u32,
                    image_url: format!("https://picsum.photos/400/300?random={i}"),
                };
                let draft = PlaceDraft::from_stub(&stub);
                EnrichedPlace::from_draft(stub, draft, backfill)
            })
            .collect();

        let mut trip = EnrichedTrip::from_itinerary(itinerary, places);
        trip.is_public = self.is_public;
        trip
    }
}

impl Default for TestTrip {
    fn default() -> Self {
        Self::new()
    }
}
