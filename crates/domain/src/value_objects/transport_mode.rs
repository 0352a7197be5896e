//! Transport mode value object and the per-mode container

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Long-distance transport mode compared by the advisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Intercity bus
    Bus,
    /// Long-distance train
    Train,
    /// Domestic flight
    Flight,
}

impl TransportMode {
    /// All modes in presentation order
    pub const ALL: [Self; 3] = [Self::Bus, Self::Train, Self::Flight];

    /// Lowercase identifier used in JSON and search queries
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::Train => "train",
            Self::Flight => "flight",
        }
    }

    /// Get an emoji representation
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Bus => "🚌",
            Self::Train => "🚆",
            Self::Flight => "✈️",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bus" => Ok(Self::Bus),
            "train" | "rail" => Ok(Self::Train),
            "flight" | "plane" | "air" => Ok(Self::Flight),
            other => Err(DomainError::validation(format!(
                "unknown transport mode '{other}', expected bus, train or flight"
            ))),
        }
    }
}

/// One value per transport mode
///
/// Serializes as `{"bus": .., "train": .., "flight": ..}`, which is the shape
/// the orchestrating agent receives for time and cost estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerMode<T> {
    /// Value for [`TransportMode::Bus`]
    pub bus: T,
    /// Value for [`TransportMode::Train`]
    pub train: T,
    /// Value for [`TransportMode::Flight`]
    pub flight: T,
}

impl<T> PerMode<T> {
    /// Build from explicit per-mode values
    pub const fn new(bus: T, train: T, flight: T) -> Self {
        Self { bus, train, flight }
    }

    /// Build by evaluating `f` once per mode
    pub fn from_fn(mut f: impl FnMut(TransportMode) -> T) -> Self {
        Self {
            bus: f(TransportMode::Bus),
            train: f(TransportMode::Train),
            flight: f(TransportMode::Flight),
        }
    }

    /// Borrow the value for one mode
    pub const fn get(&self, mode: TransportMode) -> &T {
        match mode {
            TransportMode::Bus => &self.bus,
            TransportMode::Train => &self.train,
            TransportMode::Flight => &self.flight,
        }
    }

    /// Transform every value, keeping the mode alongside
    pub fn map<U>(self, mut f: impl FnMut(TransportMode, T) -> U) -> PerMode<U> {
        PerMode {
            bus: f(TransportMode::Bus, self.bus),
            train: f(TransportMode::Train, self.train),
            flight: f(TransportMode::Flight, self.flight),
        }
    }

    /// Iterate `(mode, &value)` pairs in [`TransportMode::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (TransportMode, &T)> {
        TransportMode::ALL.into_iter().map(move |mode| (mode, self.get(mode)))
    }
}
