//! Session flows against in-process engines.

use chrono::Local;
use routing_hybrid::sdk::geo::{GeoPoint, Waypoint};
use routing_hybrid::sdk::map::InMemoryScene;
use routing_hybrid::sdk::routing::{
    BackendError, BackendSelector, ConnectivitySignal, Place, Route, RouteOptions, RoutingError,
    RoutingProvider, Section,
};
use routing_hybrid::sdk::session::{RoutingSession, ROUTE_DETAILS_TITLE, ROUTE_ERROR_TITLE};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Answers with a straight-line route through the requested waypoints.
struct StraightLine {
    name: &'static str,
    calls: AtomicUsize,
    fail: bool,
}

impl StraightLine {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoutingProvider for StraightLine {
    fn name(&self) -> &str {
        self.name
    }

    fn calculate_route(
        &self,
        waypoints: &[Waypoint],
        _: &RouteOptions,
    ) -> Result<Vec<Route>, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RoutingError::RoutingFailure(BackendError::UnroutablePoint));
        }
        let now = Local::now();
        let geometry: Vec<GeoPoint> = waypoints.iter().map(|w| w.coordinates).collect();
        let sections = geometry
            .windows(2)
            .map(|leg| Section {
                departure_place: Place {
                    map_matched_coordinates: leg[0],
                },
                arrival_place: Place {
                    map_matched_coordinates: leg[1],
                },
                departure_time: now,
                arrival_time: now,
                length_in_meters: 6172,
                duration_secs: 2700,
                maneuvers: Vec::new(),
                notices: Vec::new(),
            })
            .collect::<Vec<_>>();
        Ok(vec![Route {
            duration_secs: 2700 * sections.len() as u64,
            length_in_meters: 6172 * sections.len() as u64,
            geometry,
            sections,
        }])
    }
}

fn session(
    online: Arc<StraightLine>,
    offline: Arc<StraightLine>,
    connected: bool,
) -> RoutingSession<InMemoryScene> {
    let selector = BackendSelector::new(online, offline, ConnectivitySignal::new(connected));
    RoutingSession::new(selector, InMemoryScene::default()).with_seed(42)
}

fn pt(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

#[tokio::test]
async fn add_route_uses_selected_engine_and_draws_it() {
    let online = StraightLine::new("online");
    let offline = StraightLine::new("offline");
    let mut session = session(online.clone(), offline.clone(), false);

    let note = session.add_route_between(pt(52.50, 13.40), pt(52.53, 13.43)).await;
    assert_eq!(note.title, ROUTE_DETAILS_TITLE);
    assert_eq!(note.message, "Travel Time: 0:45, Length: 6.172 km");
    assert_eq!(offline.calls(), 1);
    assert_eq!(online.calls(), 0);

    let scene = session.overlays().scene();
    assert_eq!(scene.marker_count(), 2);
    assert_eq!(scene.polyline_count(), 1);
}

#[tokio::test]
async fn switching_changes_engine_for_next_request() {
    let online = StraightLine::new("RoutingEngine");
    let offline = StraightLine::new("OfflineRoutingEngine");
    let mut session = session(online.clone(), offline.clone(), false);

    let note = session.switch_online();
    assert_eq!(note.title, "Note");
    assert_eq!(note.message, "The app uses now the RoutingEngine.");
    session.add_route().await;
    assert_eq!(online.calls(), 1);

    let note = session.switch_offline();
    assert_eq!(note.message, "The app uses now the OfflineRoutingEngine.");
    session.add_route().await;
    assert_eq!(offline.calls(), 1);
    assert_eq!(online.calls(), 1);
}

#[tokio::test]
async fn waypoints_need_a_route_first() {
    let online = StraightLine::new("online");
    let offline = StraightLine::new("offline");
    let mut session = session(online.clone(), offline.clone(), true);

    let note = session.add_waypoints().await;
    assert_eq!(note.title, "Error");
    assert_eq!(note.message, "Please add a route first.");
    assert_eq!(online.calls() + offline.calls(), 0);
}

#[tokio::test]
async fn waypoints_reroute_and_add_red_markers() {
    let online = StraightLine::new("online");
    let offline = StraightLine::new("offline");
    let mut session = session(online.clone(), offline, true);

    session.add_route().await;
    let note = session.add_waypoints().await;
    assert_eq!(note.title, ROUTE_DETAILS_TITLE);
    // three legs now
    assert_eq!(note.message, "Travel Time: 2:15, Length: 18.516 km");
    assert_eq!(online.calls(), 2);

    let scene = session.overlays().scene();
    assert_eq!(scene.marker_count(), 4);
    assert_eq!(scene.polyline_count(), 1);
    assert_eq!(session.overlays().live().markers.len(), 4);
}

#[tokio::test]
async fn explicit_vias_keep_start_and_destination() {
    let online = StraightLine::new("online");
    let offline = StraightLine::new("offline");
    let mut session = session(online, offline, true);

    let start = pt(52.50, 13.40);
    let destination = pt(52.53, 13.43);
    session.add_route_between(start, destination).await;
    session.add_waypoints_via(vec![pt(52.51, 13.41)]).await;

    let scene = session.overlays().scene();
    let live = session.overlays().live();
    assert_eq!(scene.marker(live.markers[0]).unwrap().0, start);
    assert_eq!(scene.marker(live.markers[1]).unwrap().0, destination);
    assert_eq!(scene.marker(live.markers[2]).unwrap().0, pt(52.51, 13.41));
}

#[tokio::test]
async fn failure_is_reported_and_old_route_stays() {
    let online = StraightLine::new("online");
    let offline = StraightLine::failing("offline");
    let mut session = session(online, offline, true);

    session.add_route().await;
    session.switch_offline();
    let note = session.add_route().await;
    assert_eq!(note.title, ROUTE_ERROR_TITLE);
    assert!(note.message.contains("not routable"));
    assert_eq!(session.overlays().scene().polyline_count(), 1);
}

#[tokio::test]
async fn clear_map_removes_everything() {
    let online = StraightLine::new("online");
    let offline = StraightLine::new("offline");
    let mut session = session(online, offline, true);

    session.add_route().await;
    session.add_waypoints().await;
    assert_eq!(session.overlays().scene().marker_count(), 4);

    session.clear_map();
    assert!(session.overlays().live().is_empty());
    let scene = session.overlays().scene();
    assert_eq!(scene.marker_count(), 0);
    assert_eq!(scene.polyline_count(), 0);
}

#[tokio::test]
async fn failed_via_route_adds_no_waypoint_markers() {
    let online = StraightLine::new("online");
    let offline = StraightLine::failing("offline");
    let mut session = session(online, offline.clone(), true);

    session.add_route().await;
    session.switch_offline();
    let note = session.add_waypoints_via(vec![pt(52.51, 13.41)]).await;
    assert_eq!(note.title, ROUTE_ERROR_TITLE);
    assert_eq!(offline.calls(), 1);
    assert_eq!(session.overlays().live().markers.len(), 2);
    assert_eq!(session.overlays().scene().marker_count(), 2);
}

#[tokio::test]
async fn into_scene_returns_the_drawn_route() {
    let online = StraightLine::new("online");
    let offline = StraightLine::new("offline");
    let mut session = session(online, offline, true);

    session.add_route().await;
    let scene = session.into_scene();
    assert_eq!(scene.marker_count(), 2);
    assert_eq!(scene.polyline_count(), 1);
}
