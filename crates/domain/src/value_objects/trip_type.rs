//! Trip type and trip priority value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Whether the traveller needs a return journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    /// Single journey
    #[default]
    #[serde(alias = "one-way", alias = "one_way")]
    Oneway,
    /// Outbound plus return journey
    #[serde(alias = "roundtrip", alias = "round-trip", alias = "round_trip")]
    Round,
}

impl TripType {
    /// Multiplier applied to a one-way price
    #[must_use]
    pub const fn legs(&self) -> u64 {
        match self {
            Self::Oneway => 1,
            Self::Round => 2,
        }
    }

    /// Lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Oneway => "oneway",
            Self::Round => "round",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TripType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oneway" | "one-way" | "one_way" => Ok(Self::Oneway),
            "round" | "roundtrip" | "round-trip" | "round_trip" => Ok(Self::Round),
            other => Err(DomainError::validation(format!(
                "unknown trip type '{other}', expected 'oneway' or 'round'"
            ))),
        }
    }
}

/// What the traveller optimises for when several modes fit the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripPriority {
    /// Shortest door-to-door time
    Time,
    /// Lowest price
    #[default]
    Budget,
}

impl fmt::Display for TripPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => write!(f, "time"),
            Self::Budget => write!(f, "budget"),
        }
    }
}

impl FromStr for TripPriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "time" | "fast" | "fastest" => Ok(Self::Time),
            "budget" | "cost" | "cheap" | "cheapest" => Ok(Self::Budget),
            other => Err(DomainError::validation(format!(
                "unknown priority '{other}', expected 'time' or 'budget'"
            ))),
        }
    }
}
