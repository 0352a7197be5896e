//! Travel Advisor HTTP presentation layer
//!
//! Serves the agent tool surface and the trip planner over HTTP.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{ValidatedJson, ValidationError};
pub use routes::{create_app, create_router};
pub use state::AppState;
