//! Map display seam: whatever draws markers and polylines implements
//! [`MapScene`]; [`OverlayManager`] decides what is on it.

pub mod memory;
pub mod overlay;

pub use memory::InMemoryScene;
pub use overlay::{OverlayManager, OverlaySet};

use super::geo::GeoPoint;

/// Opaque id of a marker placed on a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub(crate) u64);

/// Opaque id of a polyline placed on a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolylineHandle(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerImage {
    /// Start and destination.
    GreenDot,
    /// Intermediate waypoints.
    RedDot,
}

impl MarkerImage {
    pub fn file_name(self) -> &'static str {
        match self {
            MarkerImage::GreenDot => "green_dot.png",
            MarkerImage::RedDot => "red_dot.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineStyle {
    pub width_px: f32,
    pub color: Rgba,
}

impl PolylineStyle {
    /// Translucent teal, 20 px wide.
    pub const ROUTE: PolylineStyle = PolylineStyle {
        width_px: 20.0,
        color: Rgba {
            r: 0.0,
            g: 0.56,
            b: 0.54,
            a: 0.63,
        },
    };
}

pub trait MapScene {
    fn add_marker(&mut self, position: GeoPoint, image: MarkerImage) -> MarkerHandle;

    fn remove_marker(&mut self, handle: MarkerHandle);

    fn add_polyline(&mut self, geometry: &[GeoPoint], style: PolylineStyle) -> PolylineHandle;

    fn remove_polyline(&mut self, handle: PolylineHandle);

    /// Geographic coordinate at the center of the current view.
    fn view_center(&self) -> GeoPoint;
}
