//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the geo and search
//! integration crates, loads configuration and secrets, sets up logging and
//! wires everything into [`TravelServices`].

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::{ProviderKeys, TravelServices, secret_store};
pub use config::{AppConfig, ENV_PREFIX, SecretsConfig, ServerConfig};
pub use telemetry::{
    LogFormat, TelemetryConfig, TelemetryError, filter_for_verbosity, init_telemetry,
};
