//! Trip request entity

use serde::{Deserialize, Serialize};

use crate::{
    errors::DomainError,
    value_objects::{BudgetTier, Mood, Preferences},
};

/// Longest accepted custom instruction text, in characters
pub const MAX_CUSTOM_PROMPT_CHARS: usize = 500;

/// Longest accepted location text, in characters
pub const MAX_LOCATION_CHARS: usize = 100;

/// Accepted trip durations in hours
pub const DURATION_HOURS: std::ops::RangeInclusive<u8> = 1..=24;

/// What a traveller asked for. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    mood: Mood,
    location: String,
    duration_hours: u8,
    budget_tier: BudgetTier,
    #[serde(default)]
    preferences: Preferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_prompt: Option<String>,
}

impl TripRequest {
    /// Create a validated request without preferences or custom instructions
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` for an empty or overlong location
    /// or a duration outside 1..=24 hours.
    pub fn new(
        mood: Mood,
        location: impl Into<String>,
        duration_hours: u8,
        budget_tier: BudgetTier,
    ) -> Result<Self, DomainError> {
        let request = Self {
            mood,
            location: location.into().trim().to_string(),
            duration_hours,
            budget_tier,
            preferences: Preferences::none(),
            custom_prompt: None,
        };
        request.validate()?;
        Ok(request)
    }

    /// Attach traveller preferences
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Attach free-text instructions for the generator
    ///
    /// Blank text clears the instructions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the text exceeds 500 characters.
    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Result<Self, DomainError> {
        let prompt = prompt.into().trim().to_string();
        self.custom_prompt = (!prompt.is_empty()).then_some(prompt);
        self.validate()?;
        Ok(self)
    }

    /// Re-check every field; used for requests that arrive already deserialized
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.location.trim().is_empty() {
            return Err(DomainError::validation("location must not be empty"));
        }
        if self.location.chars().count() > MAX_LOCATION_CHARS {
            return Err(DomainError::validation(format!(
                "location must be at most {MAX_LOCATION_CHARS} characters"
            )));
        }
        if !DURATION_HOURS.contains(&self.duration_hours) {
            return Err(DomainError::validation(format!(
                "duration must be between {} and {} hours, got {}",
                DURATION_HOURS.start(),
                DURATION_HOURS.end(),
                self.duration_hours
            )));
        }
        if let Some(prompt) = &self.custom_prompt {
            if prompt.chars().count() > MAX_CUSTOM_PROMPT_CHARS {
                return Err(DomainError::validation(format!(
                    "custom prompt must be at most {MAX_CUSTOM_PROMPT_CHARS} characters"
                )));
            }
        }
        Ok(())
    }

    pub const fn mood(&self) -> Mood {
        self.mood
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub const fn duration_hours(&self) -> u8 {
        self.duration_hours
    }

    pub const fn budget_tier(&self) -> BudgetTier {
        self.budget_tier
    }

    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn custom_prompt(&self) -> Option<&str> {
        self.custom_prompt.as_deref()
    }
}
