use super::geo::{random_point_around, GeoPoint, Waypoint};
use super::map::{MapScene, OverlayManager};
use super::present;
use super::routing::{BackendSelector, Route, RouteOptions, RoutingClient};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// A `(title, message)` pair for whoever shows messages to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.message)
    }
}

pub const ROUTE_DETAILS_TITLE: &str = "Route Details";
pub const ROUTE_ERROR_TITLE: &str = "Error while calculating a route:";

/// Drives one map: picks the engine, requests routes, shows the result.
///
/// Methods take `&mut self` and finish their overlay work before returning,
/// so requests made through one session never interleave.
pub struct RoutingSession<S: MapScene> {
    selector: BackendSelector,
    client: RoutingClient,
    overlays: OverlayManager<S>,
    options: RouteOptions,
    rng: StdRng,
    start: Option<GeoPoint>,
    destination: Option<GeoPoint>,
}

impl<S: MapScene> RoutingSession<S> {
    pub fn new(selector: BackendSelector, scene: S) -> Self {
        Self {
            selector,
            client: RoutingClient::new(),
            overlays: OverlayManager::new(scene),
            options: RouteOptions::car(),
            rng: StdRng::from_entropy(),
            start: None,
            destination: None,
        }
    }

    pub fn with_options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }

    /// Makes the random start/destination/via points reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn selector(&self) -> &BackendSelector {
        &self.selector
    }

    pub fn overlays(&self) -> &OverlayManager<S> {
        &self.overlays
    }

    pub fn into_scene(self) -> S {
        self.overlays.into_scene()
    }

    fn random_point(&mut self) -> GeoPoint {
        let center = self.overlays.scene().view_center();
        random_point_around(center, &mut self.rng)
    }

    /// Routes between two random points near the view center.
    pub async fn add_route(&mut self) -> Notification {
        let start = self.random_point();
        let destination = self.random_point();
        self.add_route_between(start, destination).await
    }

    pub async fn add_route_between(&mut self, start: GeoPoint, destination: GeoPoint) -> Notification {
        self.start = Some(start);
        self.destination = Some(destination);
        match self.route_and_show(vec![start, destination]).await {
            Ok(details) | Err(details) => details,
        }
    }

    /// Re-routes the last start/destination through two random via points.
    pub async fn add_waypoints(&mut self) -> Notification {
        if self.start.is_none() || self.destination.is_none() {
            return Notification::new("Error", "Please add a route first.");
        }
        let vias = vec![self.random_point(), self.random_point()];
        self.add_waypoints_via(vias).await
    }

    pub async fn add_waypoints_via(&mut self, vias: Vec<GeoPoint>) -> Notification {
        let (Some(start), Some(destination)) = (self.start, self.destination) else {
            return Notification::new("Error", "Please add a route first.");
        };

        let mut points = Vec::with_capacity(vias.len() + 2);
        points.push(start);
        points.extend(vias.iter().copied());
        points.push(destination);

        match self.route_and_show(points).await {
            Ok(details) => {
                self.overlays.add_waypoint_markers(&vias);
                details
            }
            Err(error) => error,
        }
    }

    pub fn clear_map(&mut self) {
        self.overlays.clear();
    }

    pub fn switch_online(&mut self) -> Notification {
        self.selector.set_connected(true);
        self.engine_note()
    }

    pub fn switch_offline(&mut self) -> Notification {
        self.selector.set_connected(false);
        self.engine_note()
    }

    fn engine_note(&self) -> Notification {
        let engine = self.selector.select();
        Notification::new("Note", format!("The app uses now the {}.", engine.name()))
    }

    /// `Ok` carries the route details once the route is on the map, `Err`
    /// the error notification.
    async fn route_and_show(
        &mut self,
        points: Vec<GeoPoint>,
    ) -> Result<Notification, Notification> {
        let backend = self.selector.select();
        let waypoints: Vec<Waypoint> = points.into_iter().map(Waypoint::from).collect();

        let pending = self
            .client
            .calculate_route(waypoints, self.options.clone(), backend);
        match pending.await {
            Ok(routes) => {
                // The client never hands out an empty list.
                let Some(route) = routes.first() else {
                    return Err(Notification::new(ROUTE_ERROR_TITLE, "No route returned"));
                };
                self.overlays.display_route(route);
                self.log_route(route);
                Ok(Notification::new(
                    ROUTE_DETAILS_TITLE,
                    present::summarize(route).to_string(),
                ))
            }
            Err(e) => {
                log::error!("Route calculation failed: {}", e);
                Err(Notification::new(ROUTE_ERROR_TITLE, e.to_string()))
            }
        }
    }

    fn log_route(&self, route: &Route) {
        for line in present::section_lines(route) {
            log::info!("{}", line);
        }
        for section in &route.sections {
            log::info!("Log maneuver instructions per section:");
            for line in present::maneuver_lines(section) {
                log::info!("{}", line);
            }
        }
        // A caller may reject routes that carry warnings; we only report them.
        for code in present::notice_codes(route) {
            log::warn!("This route contains the following warning: {}", code);
        }
    }
}
