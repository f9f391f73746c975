//! Domain entities - Objects with identity and lifecycle

mod itinerary;
mod place;
mod trip;
mod trip_request;

pub use itinerary::{GeneratedItinerary, ItineraryContent, ItinerarySource, MAX_PLACES, MIN_PLACES};
pub use place::{Backfill, DEFAULT_PLACE_KIND, EnrichedPlace, PlaceDraft, PlaceStub, round_rating};
pub use trip::EnrichedTrip;
pub use trip_request::{DURATION_HOURS, MAX_CUSTOM_PROMPT_CHARS, MAX_LOCATION_CHARS, TripRequest};
