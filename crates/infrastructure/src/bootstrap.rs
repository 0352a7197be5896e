//! Wires configuration and secrets into the travel services
//!
//! Provider chains are assembled in fixed order (Mappls first, then the free
//! fallback). A keyed provider whose key is missing is left out.

use std::sync::Arc;

use application::ports::{ClockPort, GeocodingPort, RoutingPort, SecretStorePort, WebSearchPort};
use application::{
    ApplicationError, CostService, FareService, GeocoderChain, RouteService, RouterChain,
    TravelToolService, TripPlanner,
};
use tracing::{info, instrument, warn};

use crate::adapters::{
    EnvSecretStore, FileSecretStore, GeocodingAdapter, LayeredSecretStore, RoutingAdapter,
    SystemClock, WebSearchAdapter,
};
use crate::config::{AppConfig, SecretsConfig};

/// API keys for the keyed providers
#[derive(Clone, Default)]
pub struct ProviderKeys {
    /// Mappls key (geocoding and routing)
    pub mappls: Option<String>,
    /// Serper key (search)
    pub serper: Option<String>,
}

impl std::fmt::Debug for ProviderKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderKeys")
            .field("mappls", &self.mappls.is_some())
            .field("serper", &self.serper.is_some())
            .finish()
    }
}

impl ProviderKeys {
    /// Look both keys up in the secret store
    ///
    /// # Errors
    ///
    /// Returns an error only if a backend fails; missing keys are `None`.
    pub async fn resolve(
        store: &dyn SecretStorePort,
        names: &SecretsConfig,
    ) -> Result<Self, ApplicationError> {
        let mappls = store.get_optional(&names.mappls_key).await?;
        let serper = store.get_optional(&names.serper_key).await?;
        info!(
            mappls = mappls.is_some(),
            serper = serper.is_some(),
            "Resolved provider keys"
        );
        Ok(Self { mappls, serper })
    }
}

/// Host secrets file first, environment second
///
/// # Errors
///
/// Returns an error if the secrets file exists but cannot be parsed.
pub fn secret_store(config: &SecretsConfig) -> Result<LayeredSecretStore, ApplicationError> {
    let file = FileSecretStore::load(&config.file)?;
    let env = config
        .env_prefix
        .as_ref()
        .map_or_else(EnvSecretStore::new, EnvSecretStore::with_prefix);
    let stores: Vec<Arc<dyn SecretStorePort>> = vec![Arc::new(file), Arc::new(env)];
    Ok(LayeredSecretStore::new(stores))
}

/// Every service the presentation layers need
#[derive(Debug, Clone)]
pub struct TravelServices {
    /// Geocode + route
    pub routes: Arc<RouteService>,
    /// Cost estimation with live-fare enrichment
    pub costs: Arc<CostService>,
    /// Agent-facing tool surface
    pub tools: Arc<TravelToolService>,
    /// End-to-end trip planning
    pub planner: Arc<TripPlanner>,
}

impl TravelServices {
    /// Build the services from configuration and the configured secret store
    ///
    /// # Errors
    ///
    /// Returns an error if the secret store cannot be read or a client
    /// cannot be constructed.
    #[instrument(skip(config))]
    pub async fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let store = secret_store(&config.secrets)?;
        let keys = ProviderKeys::resolve(&store, &config.secrets).await?;
        Self::build(config, &keys, Arc::new(SystemClock))
    }

    /// Build the services from configuration and already-resolved keys
    ///
    /// # Errors
    ///
    /// Returns an error if a client cannot be constructed.
    pub fn build(
        config: &AppConfig,
        keys: &ProviderKeys,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, ApplicationError> {
        let mappls_key = keys.mappls.as_deref().filter(|k| !k.trim().is_empty());

        let mut geocoders: Vec<Arc<dyn GeocodingPort>> = Vec::new();
        let mut routers: Vec<Arc<dyn RoutingPort>> = Vec::new();
        if let Some(key) = mappls_key {
            geocoders.push(Arc::new(GeocodingAdapter::mappls(&config.geo.mappls, key)?));
            routers.push(Arc::new(RoutingAdapter::mappls(&config.geo.mappls, key)?));
        } else {
            warn!("No Mappls key configured, using Nominatim and OSRM only");
        }
        geocoders.push(Arc::new(GeocodingAdapter::nominatim(&config.geo.nominatim)?));
        routers.push(Arc::new(RoutingAdapter::osrm(&config.geo.osrm)?));

        let search = Self::search(config, keys)?;

        let routes = Arc::new(RouteService::new(
            GeocoderChain::new(geocoders),
            RouterChain::new(routers),
        ));
        let fares = FareService::new(search.clone(), config.fares.clone());
        let costs = Arc::new(CostService::new(fares, clock, config.pricing));
        let tools = Arc::new(TravelToolService::new(
            Arc::clone(&routes),
            Arc::clone(&costs),
            search,
        ));
        let planner = Arc::new(TripPlanner::new(Arc::clone(&routes), Arc::clone(&costs)));

        info!(capabilities = ?tools.capabilities(), "Travel services ready");

        Ok(Self {
            routes,
            costs,
            tools,
            planner,
        })
    }

    fn search(
        config: &AppConfig,
        keys: &ProviderKeys,
    ) -> Result<Option<Arc<dyn WebSearchPort>>, ApplicationError> {
        let serper_api_key = keys
            .serper
            .clone()
            .or_else(|| config.websearch.serper_api_key.clone())
            .filter(|k| !k.trim().is_empty());

        let Some(serper_api_key) = serper_api_key else {
            warn!("No Serper key configured, live fares and web search disabled");
            return Ok(None);
        };

        let websearch = integration_websearch::WebSearchConfig {
            serper_api_key: Some(serper_api_key),
            ..config.websearch.clone()
        };
        Ok(Some(Arc::new(WebSearchAdapter::new(&websearch)?)))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use application::ports::FixedClock;
    use chrono::NaiveDate;
    use domain::{GeocodingProvider, RoutingProvider};

    use super::*;

    fn clock() -> Arc<dyn ClockPort> {
        Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()))
    }

    #[test]
    fn without_keys_only_free_providers() {
        let services =
            TravelServices::build(&AppConfig::for_testing(), &ProviderKeys::default(), clock())
                .unwrap();
        let capabilities = services.tools.capabilities();

        assert_eq!(capabilities.geocoders, vec![GeocodingProvider::Nominatim]);
        assert_eq!(capabilities.routers, vec![RoutingProvider::Osrm]);
        assert_eq!(capabilities.web_search, None);
        assert!(!services.costs.fares().is_enabled());
    }

    #[test]
    fn with_keys_mappls_first_and_search_enabled() {
        let keys = ProviderKeys {
            mappls: Some("m-key".to_string()),
            serper: Some("s-key".to_string()),
        };
        let services = TravelServices::build(&AppConfig::for_testing(), &keys, clock()).unwrap();
        let capabilities = services.tools.capabilities();

        assert_eq!(
            capabilities.geocoders,
            vec![GeocodingProvider::Mappls, GeocodingProvider::Nominatim]
        );
        assert_eq!(
            capabilities.routers,
            vec![RoutingProvider::Mappls, RoutingProvider::Osrm]
        );
        assert_eq!(capabilities.web_search.as_deref(), Some("serper"));
        assert!(services.costs.fares().is_enabled());
    }

    #[test]
    fn blank_keys_are_ignored() {
        let keys = ProviderKeys {
            mappls: Some("  ".to_string()),
            serper: Some(String::new()),
        };
        let services = TravelServices::build(&AppConfig::for_testing(), &keys, clock()).unwrap();
        let capabilities = services.tools.capabilities();

        assert_eq!(capabilities.geocoders.len(), 1);
        assert_eq!(capabilities.web_search, None);
    }

    #[test]
    fn debug_does_not_leak_keys() {
        let keys = ProviderKeys {
            mappls: Some("m-key".to_string()),
            serper: None,
        };
        let debug = format!("{keys:?}");
        assert!(!debug.contains("m-key"));
    }

    #[tokio::test]
    async fn keys_resolve_from_secrets_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"SERPER_API_KEY = "from-file""#).unwrap();

        let config = SecretsConfig {
            file: file.path().to_path_buf(),
            env_prefix: Some("TRAVEL_ADVISOR_TEST_UNSET".to_string()),
            ..SecretsConfig::default()
        };
        let store = secret_store(&config).unwrap();
        let keys = ProviderKeys::resolve(&store, &config).await.unwrap();

        assert_eq!(keys.serper.as_deref(), Some("from-file"));
        assert_eq!(keys.mappls, None);
    }
}
