//! Application state shared across handlers

use std::sync::Arc;

use application::{TravelToolService, TripPlanner};
use infrastructure::{AppConfig, TravelServices};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Tool surface the agent calls
    pub tools: Arc<TravelToolService>,
    /// Trip planner for whole-trip requests
    pub planner: Arc<TripPlanner>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the state from wired services
    pub fn new(services: &TravelServices, config: AppConfig) -> Self {
        Self {
            tools: Arc::clone(&services.tools),
            planner: Arc::clone(&services.planner),
            config: Arc::new(config),
        }
    }
}
