//! Domain layer for Travel Advisor
//!
//! Contains the trip value objects, the tiered pricing model and the
//! per-mode travel-time model. Everything here is pure: no I/O, no clocks.
//! Callers pass "today" in explicitly where the demand multiplier needs it.

pub mod entities;
pub mod errors;
pub mod pricing;
pub mod timing;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use pricing::{CostInputs, CostPolicy, demand_multiplier, estimate_cost};
pub use timing::estimate_time;
pub use value_objects::*;
