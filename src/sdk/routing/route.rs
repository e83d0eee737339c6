use crate::sdk::geo::GeoPoint;
use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use std::fmt;

/// How the route will be travelled. Backends map this onto their own profiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportMode {
    #[default]
    Car,
    Truck,
    Bicycle,
    Pedestrian,
}

impl TransportMode {
    /// The matching openrouteservice profile name.
    pub fn ors_profile(self) -> &'static str {
        match self {
            TransportMode::Car => "driving-car",
            TransportMode::Truck => "driving-hgv",
            TransportMode::Bicycle => "cycling-regular",
            TransportMode::Pedestrian => "foot-walking",
        }
    }
}

impl std::str::FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "car" => Ok(TransportMode::Car),
            "truck" => Ok(TransportMode::Truck),
            "bicycle" | "bike" => Ok(TransportMode::Bicycle),
            "pedestrian" | "walk" => Ok(TransportMode::Pedestrian),
            other => Err(format!("Unknown transport mode: {}", other)),
        }
    }
}

/// Options handed to the backend as-is. `extra` entries are merged verbatim
/// into the backend request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteOptions {
    pub transport_mode: TransportMode,
    pub departure_time: Option<DateTime<Local>>,
    pub extra: Map<String, Value>,
}

impl RouteOptions {
    pub fn car() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = mode;
        self
    }

    pub fn departing_at(mut self, time: DateTime<Local>) -> Self {
        self.departure_time = Some(time);
        self
    }

    pub fn with_option(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

/// Turn-by-turn action of a maneuver. Codes the engine reports that have no
/// named variant are kept in `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManeuverAction {
    Depart,
    Arrive,
    LeftTurn,
    RightTurn,
    SharpLeftTurn,
    SharpRightTurn,
    SlightLeftTurn,
    SlightRightTurn,
    Continue,
    EnterRoundabout,
    ExitRoundabout,
    LeftUTurn,
    KeepLeft,
    KeepRight,
    Other(u32),
}

impl fmt::Display for ManeuverAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManeuverAction::Other(code) => write!(f, "other({})", code),
            named => fmt::Debug::fmt(named, f),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Maneuver {
    pub text: String,
    pub action: ManeuverAction,
    pub coordinates: GeoPoint,
}

/// A warning that some route option could not be honored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub code: u32,
    pub message: String,
}

/// The map-matched position where a section starts or ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Place {
    pub map_matched_coordinates: GeoPoint,
}

/// One leg of a route, between two consecutive waypoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub departure_place: Place,
    pub arrival_place: Place,
    pub departure_time: DateTime<Local>,
    pub arrival_time: DateTime<Local>,
    pub length_in_meters: u64,
    pub duration_secs: u64,
    pub maneuvers: Vec<Maneuver>,
    pub notices: Vec<Notice>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub duration_secs: u64,
    pub length_in_meters: u64,
    pub geometry: Vec<GeoPoint>,
    pub sections: Vec<Section>,
}

impl Route {
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.sections.iter().flat_map(|s| s.notices.iter())
    }
}
