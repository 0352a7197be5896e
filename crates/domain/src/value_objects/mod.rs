//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod start_date;
mod transport_mode;
mod trip_type;

pub use coordinate::Coordinate;
pub use start_date::StartDate;
pub use transport_mode::{PerMode, TransportMode};
pub use trip_type::{TripPriority, TripType};
