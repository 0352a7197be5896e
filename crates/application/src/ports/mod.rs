//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod clock_port;
mod geocoding_port;
mod routing_port;
mod secret_store;
mod websearch_port;

#[cfg(test)]
pub use clock_port::MockClockPort;
pub use clock_port::{ClockPort, FixedClock};
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::RoutingPort;
#[cfg(test)]
pub use secret_store::MockSecretStorePort;
pub use secret_store::SecretStorePort;
#[cfg(test)]
pub use websearch_port::MockWebSearchPort;
pub use websearch_port::{SearchOptions, WebSearchPort};
