//! Budget tier value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

const PROMPT_LABELS: [&str; 5] = [
    "free activities",
    "budget-friendly ($)",
    "moderate ($$)",
    "premium ($$$)",
    "luxury ($$$$)",
];

const COST_RANGE_LABELS: [&str; 5] = ["Free - $10", "$10 - $30", "$30 - $75", "$75 - $150", "$150+"];

/// Ordinal spending level from 0 (free) to 4 (luxury)
///
/// The tier is a label, not an amount; no currency conversion happens anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BudgetTier(u8);

impl BudgetTier {
    /// Highest valid tier
    pub const MAX: u8 = 4;

    /// Create a validated tier
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBudgetTier` for values above 4
    pub fn new(tier: u8) -> Result<Self, DomainError> {
        if tier > Self::MAX {
            return Err(DomainError::InvalidBudgetTier(tier));
        }
        Ok(Self(tier))
    }

    /// Raw tier value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Label used when describing the budget to the AI backend
    #[must_use]
    pub const fn prompt_label(self) -> &'static str {
        PROMPT_LABELS[self.0 as usize]
    }

    /// Cost-range label shown to travellers
    #[must_use]
    pub const fn cost_range_label(self) -> &'static str {
        COST_RANGE_LABELS[self.0 as usize]
    }
}

impl Default for BudgetTier {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for BudgetTier {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BudgetTier> for u8 {
    fn from(tier: BudgetTier) -> Self {
        tier.0
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cost_range_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_through_four() {
        for tier in 0..=4 {
            assert!(BudgetTier::new(tier).is_ok());
        }
        assert!(BudgetTier::new(5).is_err());
    }

    #[test]
    fn labels_for_extremes() {
        let free = BudgetTier::new(0).unwrap();
        assert_eq!(free.cost_range_label(), "Free - $10");
        assert_eq!(free.prompt_label(), "free activities");

        let luxury = BudgetTier::new(4).unwrap();
        assert_eq!(luxury.cost_range_label(), "$150+");
        assert_eq!(luxury.prompt_label(), "luxury ($$$$)");
    }

    #[test]
    fn default_is_moderate() {
        assert_eq!(BudgetTier::default().value(), 2);
        assert_eq!(BudgetTier::default().cost_range_label(), "$30 - $75");
    }

    #[test]
    fn serde_validates() {
        let tier: BudgetTier = serde_json::from_str("3").unwrap();
        assert_eq!(tier.value(), 3);
        assert!(serde_json::from_str::<BudgetTier>("9").is_err());
        assert_eq!(serde_json::to_string(&tier).unwrap(), "3");
    }
}
