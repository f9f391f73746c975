//! Testing utilities for infrastructure tests.

mod test_fixtures;

pub use test_fixtures::TestTrip;
