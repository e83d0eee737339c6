use super::error::RoutingError;
use super::route::{Route, RouteOptions};
use crate::sdk::geo::Waypoint;

/// A routing engine. Calls block until the engine answers; use
/// [`RoutingClient`](super::client::RoutingClient) to run them off-thread.
pub trait RoutingProvider: Send + Sync {
    /// Short human-readable engine name, used in logs and notifications.
    fn name(&self) -> &str;

    /// Calculates routes through `waypoints` in order. On success the best
    /// route comes first.
    fn calculate_route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Vec<Route>, RoutingError>;
}
