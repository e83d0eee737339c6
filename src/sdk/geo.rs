use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Berlin Alexanderplatz, where the example app points its camera.
pub const DEFAULT_MAP_CENTER: GeoPoint = GeoPoint {
    latitude: 52.520798,
    longitude: 13.409408,
};

/// Half-width, in degrees, of the box used by [`random_point_around`].
pub const RANDOM_SPREAD_DEG: f64 = 0.02;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    #[error("Latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// A WGS84 coordinate. Always holds a finite latitude in [-90, 90] and a
/// finite longitude in [-180, 180].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = CoordinateError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a point from a `[lon, lat]` pair, the axis order used by GeoJSON.
    pub fn from_lon_lat(pair: [f64; 2]) -> Result<Self, CoordinateError> {
        Self::new(pair[1], pair[0])
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = String;

    /// Parses `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("Expected LAT,LON but got \"{}\"", s))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|e| format!("Invalid latitude \"{}\": {}", lat.trim(), e))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|e| format!("Invalid longitude \"{}\": {}", lon.trim(), e))?;
        GeoPoint::new(lat, lon).map_err(|e| e.to_string())
    }
}

/// A coordinate a route must pass through.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    pub coordinates: GeoPoint,
}

impl Waypoint {
    pub fn new(coordinates: GeoPoint) -> Self {
        Self { coordinates }
    }
}

impl From<GeoPoint> for Waypoint {
    fn from(coordinates: GeoPoint) -> Self {
        Self { coordinates }
    }
}

/// Picks a point uniformly inside a ±[`RANDOM_SPREAD_DEG`] box around `center`,
/// clamped to valid coordinate ranges.
pub fn random_point_around<R: Rng + ?Sized>(center: GeoPoint, rng: &mut R) -> GeoPoint {
    let lat = rng
        .gen_range(center.latitude - RANDOM_SPREAD_DEG..=center.latitude + RANDOM_SPREAD_DEG)
        .clamp(-90.0, 90.0);
    let lon = rng
        .gen_range(center.longitude - RANDOM_SPREAD_DEG..=center.longitude + RANDOM_SPREAD_DEG)
        .clamp(-180.0, 180.0);
    GeoPoint { latitude: lat, longitude: lon }
}
