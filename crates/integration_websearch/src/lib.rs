#![forbid(unsafe_code)]
//! Web search integration for Travel Advisor
//!
//! Provides text search via the [Serper](https://serper.dev) Google Search
//! API. Results come back as domain [`WebSearchResponse`](domain::WebSearchResponse)
//! values with source domains filled in, ready for citation or snippet
//! mining.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_websearch::{SearchProvider, SerperSearchClient, WebSearchConfig};
//!
//! let config = WebSearchConfig {
//!     serper_api_key: Some(key),
//!     ..WebSearchConfig::default()
//! };
//! let client = SerperSearchClient::new(&config)?;
//! let response = client.search("train ticket price Pune to Goa", 5).await?;
//! ```

mod config;
mod error;
mod provider;
mod serper;

pub use config::WebSearchConfig;
pub use error::WebSearchError;
pub use provider::SearchProvider;
pub use serper::SerperSearchClient;
