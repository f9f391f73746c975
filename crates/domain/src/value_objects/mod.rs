//! Value Objects - Immutable, identity-less domain primitives

mod budget_tier;
mod geo_location;
mod mood;
mod preference;
mod trip_id;

pub use budget_tier::BudgetTier;
pub use geo_location::GeoLocation;
pub use mood::Mood;
pub use preference::{Preference, Preferences};
pub use trip_id::TripId;
