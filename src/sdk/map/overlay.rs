use super::{MapScene, MarkerHandle, MarkerImage, PolylineHandle, PolylineStyle};
use crate::sdk::geo::GeoPoint;
use crate::sdk::routing::route::Route;

/// Handles of everything drawn for the route currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlaySet {
    pub markers: Vec<MarkerHandle>,
    pub polylines: Vec<PolylineHandle>,
}

impl OverlaySet {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.polylines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.markers.len() + self.polylines.len()
    }
}

/// Sole owner of the live [`OverlaySet`]. Anything drawn for an earlier route
/// is removed from the scene before the next route is drawn.
pub struct OverlayManager<S: MapScene> {
    scene: S,
    live: OverlaySet,
}

impl<S: MapScene> OverlayManager<S> {
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            live: OverlaySet::default(),
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn live(&self) -> &OverlaySet {
        &self.live
    }

    /// Gives the scene back with the live overlays still drawn on it.
    pub fn into_scene(self) -> S {
        self.scene
    }

    /// Replaces whatever is shown with `route`: its geometry as a polyline and
    /// green markers on the map-matched start and destination.
    pub fn display_route(&mut self, route: &Route) -> &OverlaySet {
        self.clear();

        let mut next = OverlaySet::default();
        if route.geometry.len() >= 2 {
            next.polylines
                .push(self.scene.add_polyline(&route.geometry, PolylineStyle::ROUTE));
        } else {
            log::warn!("Route has no drawable geometry, skipping polyline");
        }

        if let (Some(first), Some(last)) = (route.sections.first(), route.sections.last()) {
            let start = first.departure_place.map_matched_coordinates;
            let destination = last.arrival_place.map_matched_coordinates;
            next.markers
                .push(self.scene.add_marker(start, MarkerImage::GreenDot));
            next.markers
                .push(self.scene.add_marker(destination, MarkerImage::GreenDot));
        }

        log::debug!(
            "Displaying route with {} marker(s), {} polyline(s)",
            next.markers.len(),
            next.polylines.len()
        );
        self.live = next;
        &self.live
    }

    /// Adds red markers for via points to the current set.
    pub fn add_waypoint_markers(&mut self, points: &[GeoPoint]) {
        for &point in points {
            let handle = self.scene.add_marker(point, MarkerImage::RedDot);
            self.live.markers.push(handle);
        }
    }

    pub fn clear(&mut self) {
        let old = std::mem::take(&mut self.live);
        for marker in old.markers {
            self.scene.remove_marker(marker);
        }
        for polyline in old.polylines {
            self.scene.remove_polyline(polyline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::map::InMemoryScene;
    use crate::sdk::routing::route::{Place, Section};
    use chrono::Local;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn section(from: GeoPoint, to: GeoPoint) -> Section {
        let now = Local::now();
        Section {
            departure_place: Place {
                map_matched_coordinates: from,
            },
            arrival_place: Place {
                map_matched_coordinates: to,
            },
            departure_time: now,
            arrival_time: now,
            length_in_meters: 0,
            duration_secs: 0,
            maneuvers: Vec::new(),
            notices: Vec::new(),
        }
    }

    fn route(points: &[GeoPoint]) -> Route {
        let sections = points.windows(2).map(|w| section(w[0], w[1])).collect();
        Route {
            duration_secs: 0,
            length_in_meters: 0,
            geometry: points.to_vec(),
            sections,
        }
    }

    #[test]
    fn display_adds_line_and_endpoint_markers() {
        let mut manager = OverlayManager::new(InMemoryScene::default());
        let r = route(&[pt(52.5, 13.4), pt(52.51, 13.41), pt(52.52, 13.42)]);
        let set = manager.display_route(&r).clone();

        assert_eq!(set.polylines.len(), 1);
        assert_eq!(set.markers.len(), 2);
        let scene = manager.scene();
        assert_eq!(scene.marker(set.markers[0]).unwrap().0, pt(52.5, 13.4));
        assert_eq!(scene.marker(set.markers[1]).unwrap().0, pt(52.52, 13.42));
        assert_eq!(scene.marker(set.markers[0]).unwrap().1, MarkerImage::GreenDot);
    }

    #[test]
    fn second_display_replaces_the_first() {
        let mut manager = OverlayManager::new(InMemoryScene::default());
        let first = manager.display_route(&route(&[pt(1.0, 1.0), pt(2.0, 2.0)])).clone();
        manager.add_waypoint_markers(&[pt(1.5, 1.5)]);
        let second = manager.display_route(&route(&[pt(3.0, 3.0), pt(4.0, 4.0)])).clone();

        let scene = manager.scene();
        assert_eq!(scene.marker_count(), 2);
        assert_eq!(scene.polyline_count(), 1);
        for handle in &first.markers {
            assert!(scene.marker(*handle).is_none());
        }
        for handle in &second.markers {
            assert!(scene.marker(*handle).is_some());
        }
        assert_eq!(manager.live(), &second);
    }

    #[test]
    fn waypoint_markers_append_without_clearing() {
        let mut manager = OverlayManager::new(InMemoryScene::default());
        manager.display_route(&route(&[pt(1.0, 1.0), pt(2.0, 2.0)]));
        manager.add_waypoint_markers(&[pt(1.2, 1.2), pt(1.8, 1.8)]);

        assert_eq!(manager.live().markers.len(), 4);
        assert_eq!(manager.scene().marker_count(), 4);
        let last = *manager.live().markers.last().unwrap();
        assert_eq!(manager.scene().marker(last).unwrap().1, MarkerImage::RedDot);
    }

    #[test]
    fn clear_then_display_has_no_residue() {
        let mut manager = OverlayManager::new(InMemoryScene::default());
        manager.display_route(&route(&[pt(1.0, 1.0), pt(2.0, 2.0)]));
        manager.add_waypoint_markers(&[pt(1.5, 1.5)]);
        manager.clear();
        assert!(manager.live().is_empty());
        assert_eq!(manager.scene().marker_count(), 0);
        assert_eq!(manager.scene().polyline_count(), 0);

        let set = manager.display_route(&route(&[pt(5.0, 5.0), pt(6.0, 6.0)])).clone();
        assert_eq!(set.len(), 3);
        assert_eq!(manager.scene().marker_count() + manager.scene().polyline_count(), 3);
    }

    #[test]
    fn into_scene_keeps_what_is_drawn() {
        let mut manager = OverlayManager::new(InMemoryScene::default());
        manager.display_route(&route(&[pt(1.0, 1.0), pt(2.0, 2.0)]));
        let scene = manager.into_scene();
        assert_eq!(scene.marker_count(), 2);
        assert_eq!(scene.polyline_count(), 1);
    }

    #[test]
    fn degenerate_route_draws_nothing_but_still_clears() {
        let mut manager = OverlayManager::new(InMemoryScene::default());
        manager.display_route(&route(&[pt(1.0, 1.0), pt(2.0, 2.0)]));
        let empty = Route {
            duration_secs: 0,
            length_in_meters: 0,
            geometry: vec![pt(1.0, 1.0)],
            sections: Vec::new(),
        };
        assert!(manager.display_route(&empty).is_empty());
        assert_eq!(manager.scene().marker_count(), 0);
        assert_eq!(manager.scene().polyline_count(), 0);
    }
}
