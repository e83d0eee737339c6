use super::request::{build_client, directions_url, parse_base_url, post_directions};
use crate::sdk::config::EngineConfig;
use crate::sdk::geo::Waypoint;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::route::{Route, RouteOptions};
use crate::sdk::routing::service::RoutingProvider;
use crate::sdk::util::rate_limit::{self, Limiter};
use reqwest::blocking::Client;

/// Online engine: the hosted ORS API. Every request waits on the shared
/// rate limiter and carries the API key.
pub struct RemoteOrsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    limiter: Limiter,
}

impl RemoteOrsProvider {
    pub fn new(api_key: String, base_url: &str, limiter: Limiter) -> Result<Self, RoutingError> {
        if api_key.trim().is_empty() {
            return Err(RoutingError::EngineUnavailable(
                "an API key is required for online routing".to_string(),
            ));
        }
        Ok(Self {
            client: build_client()?,
            api_key,
            base_url: parse_base_url(base_url)?,
            limiter,
        })
    }

    /// Fails with `EngineUnavailable` when no API key is configured.
    pub fn from_config(config: &EngineConfig) -> Result<Self, RoutingError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            RoutingError::EngineUnavailable("ORS_API_KEY is not set".to_string())
        })?;
        Self::new(
            api_key,
            &config.online_url,
            rate_limit::ors_limiter(config.requests_per_minute),
        )
    }
}

impl RoutingProvider for RemoteOrsProvider {
    fn name(&self) -> &str {
        "RoutingEngine"
    }

    fn calculate_route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Vec<Route>, RoutingError> {
        rate_limit::wait(&self.limiter);
        let url = directions_url(&self.base_url, options);
        log::debug!(
            "[PROVIDER] Calling remote directions for {} waypoints via {}",
            waypoints.len(),
            url
        );
        Ok(post_directions(
            &self.client,
            &url,
            Some(&self.api_key),
            waypoints,
            options,
        )?)
    }
}
