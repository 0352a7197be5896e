//! Per-mode estimates handed back to the agent

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value_objects::{PerMode, TransportMode};

/// Minutes per mode, rounded to one decimal
pub type TimeEstimate = PerMode<f64>;

/// Whole-rupee price per mode
pub type CostEstimate = PerMode<u64>;

/// Fares scraped from search snippets, one per mode that yielded a price
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiveFares(BTreeMap<TransportMode, u64>);

impl LiveFares {
    /// Empty fare set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fare for a mode
    pub fn insert(&mut self, mode: TransportMode, fare: u64) {
        self.0.insert(mode, fare);
    }

    /// Fare for a mode, if one was found
    #[must_use]
    pub fn get(&self, mode: TransportMode) -> Option<u64> {
        self.0.get(&mode).copied()
    }

    /// Whether no mode produced a fare
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of modes with a fare
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(mode, fare)` pairs in mode order
    pub fn iter(&self) -> impl Iterator<Item = (TransportMode, u64)> + '_ {
        self.0.iter().map(|(mode, fare)| (*mode, *fare))
    }
}

impl FromIterator<(TransportMode, u64)> for LiveFares {
    fn from_iter<I: IntoIterator<Item = (TransportMode, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
