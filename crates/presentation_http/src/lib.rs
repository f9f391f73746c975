//! MoodYatra HTTP presentation layer
//!
//! Trip generation, trip sharing and geodata lookups over a JSON API.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
