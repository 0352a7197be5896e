//! Routing service port

use async_trait::async_trait;
use domain::{Coordinate, DistanceResult, RoutingProvider};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for one driving-route provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Road distance and duration between two coordinates
    async fn route(
        &self,
        from: &Coordinate,
        to: &Coordinate,
    ) -> Result<DistanceResult, ApplicationError>;

    /// Which provider this adapter talks to
    fn provider(&self) -> RoutingProvider;
}
