use super::{MapScene, MarkerHandle, MarkerImage, PolylineHandle, PolylineStyle};
use crate::sdk::geo::{GeoPoint, DEFAULT_MAP_CENTER};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// A scene that keeps overlays in memory. Used by the CLI and in tests.
#[derive(Debug)]
pub struct InMemoryScene {
    center: GeoPoint,
    next_id: u64,
    markers: BTreeMap<MarkerHandle, (GeoPoint, MarkerImage)>,
    polylines: BTreeMap<PolylineHandle, (Vec<GeoPoint>, PolylineStyle)>,
}

impl Default for InMemoryScene {
    fn default() -> Self {
        Self::centered_at(DEFAULT_MAP_CENTER)
    }
}

impl InMemoryScene {
    pub fn centered_at(center: GeoPoint) -> Self {
        Self {
            center,
            next_id: 0,
            markers: BTreeMap::new(),
            polylines: BTreeMap::new(),
        }
    }

    pub fn look_at(&mut self, center: GeoPoint) {
        self.center = center;
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<(GeoPoint, MarkerImage)> {
        self.markers.get(&handle).copied()
    }

    pub fn polyline(&self, handle: PolylineHandle) -> Option<&[GeoPoint]> {
        self.polylines.get(&handle).map(|(points, _)| points.as_slice())
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn polyline_count(&self) -> usize {
        self.polylines.len()
    }

    /// Live overlays as a GeoJSON FeatureCollection.
    pub fn to_geojson(&self) -> Value {
        let lines = self.polylines.values().map(|(points, style)| {
            let coords: Vec<[f64; 2]> = points.iter().map(|p| p.to_lon_lat()).collect();
            json!({
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": coords },
                "properties": {
                    "kind": "route",
                    "width_px": style.width_px,
                    "color": [style.color.r, style.color.g, style.color.b, style.color.a],
                }
            })
        });
        let markers = self.markers.values().map(|(point, image)| {
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": point.to_lon_lat() },
                "properties": { "kind": "marker", "image": image.file_name() }
            })
        });
        json!({
            "type": "FeatureCollection",
            "features": lines.chain(markers).collect::<Vec<_>>(),
        })
    }
}

impl MapScene for InMemoryScene {
    fn add_marker(&mut self, position: GeoPoint, image: MarkerImage) -> MarkerHandle {
        let handle = MarkerHandle(self.next_id());
        log::debug!("[MAP] + marker {:?} {} at {}", handle, image.file_name(), position);
        self.markers.insert(handle, (position, image));
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        if self.markers.remove(&handle).is_none() {
            log::warn!("[MAP] marker {:?} was not on the map", handle);
        }
    }

    fn add_polyline(&mut self, geometry: &[GeoPoint], style: PolylineStyle) -> PolylineHandle {
        let handle = PolylineHandle(self.next_id());
        log::debug!("[MAP] + polyline {:?} with {} points", handle, geometry.len());
        self.polylines.insert(handle, (geometry.to_vec(), style));
        handle
    }

    fn remove_polyline(&mut self, handle: PolylineHandle) {
        if self.polylines.remove(&handle).is_none() {
            log::warn!("[MAP] polyline {:?} was not on the map", handle);
        }
    }

    fn view_center(&self) -> GeoPoint {
        self.center
    }
}
