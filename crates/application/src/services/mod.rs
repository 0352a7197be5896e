//! Application services
//!
//! Use cases built on the ports: provider chains, fare scraping, cost
//! estimation, the agent tool surface and the trip planner.

mod cost_service;
mod fare_service;
mod geocoding_service;
mod routing_service;
mod tool_service;
mod trip_planner;

pub use cost_service::{CostQuote, CostService};
pub use fare_service::{FareSearchConfig, FareService, extract_prices, median};
pub use geocoding_service::{GeocodedPlace, GeocoderChain};
pub use routing_service::{RouteService, RouterChain};
pub use tool_service::{
    Capabilities, ToolCall, ToolDescriptor, ToolOutcome, TravelTool, TravelToolService,
};
pub use trip_planner::TripPlanner;
