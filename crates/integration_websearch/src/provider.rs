//! Search provider trait

use async_trait::async_trait;
use domain::WebSearchResponse;

use crate::WebSearchError;

/// Trait for web search providers
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    ///
    /// * `query` - The search query string
    /// * `max_results` - Maximum number of results to return
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails or returns no results.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<WebSearchResponse, WebSearchError>;

    /// Check if the search provider is healthy/reachable
    async fn is_healthy(&self) -> bool;

    /// Get the provider name (e.g., "serper")
    fn provider_name(&self) -> &'static str;
}
