//! Trip mood value object

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// The overall feel a traveller wants from a day trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Exciting, high-energy activities
    #[default]
    Fun,
    /// Relaxed, laid-back experiences
    Chill,
    /// Outdoor and natural attractions
    Nature,
    /// Couple-friendly spots with ambiance
    Romantic,
}

impl Mood {
    /// All moods in display order
    pub const ALL: [Self; 4] = [Self::Fun, Self::Chill, Self::Nature, Self::Romantic];

    /// Lenient parse: unrecognized labels map to [`Mood::Fun`]
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }

    /// Lowercase wire label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fun => "fun",
            Self::Chill => "chill",
            Self::Nature => "nature",
            Self::Romantic => "romantic",
        }
    }

    /// Title prefix used for canned itineraries
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Fun => "Epic Adventure Day",
            Self::Chill => "Peaceful Relaxation Day",
            Self::Nature => "Nature Explorer Day",
            Self::Romantic => "Romantic Escape Day",
        }
    }

    /// Description of the mood for the generation prompt
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Fun => "exciting, adventurous, and energetic activities with entertainment and thrills",
            Self::Chill => "relaxing, peaceful, and laid-back experiences with calm environments",
            Self::Nature => "outdoor activities, parks, gardens, hiking trails, and natural attractions",
            Self::Romantic => "intimate, romantic, and special couple-friendly spots with ambiance",
        }
    }
}

impl FromStr for Mood {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fun" => Ok(Self::Fun),
            "chill" => Ok(Self::Chill),
            "nature" => Ok(Self::Nature),
            "romantic" => Ok(Self::Romantic),
            other => Err(DomainError::InvalidMood(other.to_string())),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
