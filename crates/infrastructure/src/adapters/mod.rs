//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod env_secret_store;
mod file_secret_store;
mod geocoding_adapter;
mod layered_secret_store;
mod routing_adapter;
mod system_clock;
mod websearch_adapter;

pub use env_secret_store::EnvSecretStore;
pub use file_secret_store::FileSecretStore;
pub use geocoding_adapter::GeocodingAdapter;
pub use layered_secret_store::LayeredSecretStore;
pub use routing_adapter::RoutingAdapter;
pub use system_clock::SystemClock;
pub use websearch_adapter::WebSearchAdapter;
