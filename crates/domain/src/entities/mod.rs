//! Entities - request-scoped results produced by the travel tools

mod estimates;
mod route;
mod trip;
mod web_search;

pub use estimates::{CostEstimate, LiveFares, TimeEstimate};
pub use route::{DistanceResult, GeocodingProvider, RoutingProvider};
pub use trip::{TravelOption, TripPlan, TripRequest};
pub use web_search::{SearchResult, WebSearchResponse};
