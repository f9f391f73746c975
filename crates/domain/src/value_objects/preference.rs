//! Traveller preference flags

use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::errors::DomainError;

/// An optional emphasis for the generated itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Foodie,
    Cultural,
    Shopping,
}

impl Preference {
    /// Sentence appended to the generation prompt
    #[must_use]
    pub const fn prompt_sentence(&self) -> &'static str {
        match self {
            Self::Foodie => "Focus on food experiences and local cuisine.",
            Self::Cultural => "Include cultural attractions, museums, and historical sites.",
            Self::Shopping => "Include shopping opportunities and local markets.",
        }
    }

    /// Lowercase wire label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Foodie => "foodie",
            Self::Cultural => "cultural",
            Self::Shopping => "shopping",
        }
    }
}

impl FromStr for Preference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "foodie" => Ok(Self::Foodie),
            "cultural" => Ok(Self::Cultural),
            "shopping" => Ok(Self::Shopping),
            other => Err(DomainError::InvalidPreference(other.to_string())),
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of preferences; ordering is stable so prompts are reproducible
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(BTreeSet<Preference>);

impl Preferences {
    /// Empty preference set
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, preference: Preference) -> bool {
        self.0.contains(&preference)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Preference> + '_ {
        self.0.iter().copied()
    }

    /// Prompt sentences for every selected preference, space separated
    #[must_use]
    pub fn prompt_text(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(
            self.iter()
                .map(|p| p.prompt_sentence())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

impl FromIterator<Preference> for Preferences {
    fn from_iter<I: IntoIterator<Item = Preference>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
