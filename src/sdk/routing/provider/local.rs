use super::request::{build_client, directions_url, parse_base_url, post_directions};
use crate::sdk::geo::Waypoint;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::route::{Route, RouteOptions};
use crate::sdk::routing::service::RoutingProvider;
use reqwest::blocking::Client;

/// Offline engine: a self-hosted ORS instance working on locally stored map
/// data. No API key and no throttling.
pub struct LocalOrsProvider {
    client: Client,
    base_url: String,
}

impl LocalOrsProvider {
    pub fn new(base_url: &str) -> Result<Self, RoutingError> {
        Ok(Self {
            client: build_client()?,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RoutingProvider for LocalOrsProvider {
    fn name(&self) -> &str {
        "OfflineRoutingEngine"
    }

    fn calculate_route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Vec<Route>, RoutingError> {
        let url = directions_url(&self.base_url, options);
        log::debug!(
            "[PROVIDER] Calling local directions for {} waypoints via {}",
            waypoints.len(),
            url
        );
        Ok(post_directions(&self.client, &url, None, waypoints, options)?)
    }
}
