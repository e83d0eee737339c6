use crate::sdk::geo::{CoordinateError, GeoPoint};
use crate::sdk::routing::route::{Maneuver, ManeuverAction, Notice, Place, Route, Section};
use chrono::{DateTime, Duration, Local};
use serde::Deserialize;

// --- Data Structures for parsing ORS GeoJSON directions responses ---

#[derive(Deserialize, Debug)]
pub struct DirectionsResponse {
    pub features: Vec<RouteFeature>,
}

#[derive(Deserialize, Debug)]
pub struct RouteFeature {
    pub geometry: LineString,
    pub properties: RouteProperties,
}

#[derive(Deserialize, Debug)]
pub struct LineString {
    /// `[lon, lat]` or `[lon, lat, elevation]`.
    pub coordinates: Vec<Vec<f64>>,
}

#[derive(Deserialize, Debug)]
pub struct RouteProperties {
    #[serde(default)]
    pub summary: DirectionsSummary,
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Geometry indices of the (snapped) request waypoints.
    #[serde(default)]
    pub way_points: Vec<usize>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

// ORS leaves out zero-valued fields, e.g. for a route of zero length.
#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct DirectionsSummary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Deserialize, Debug)]
pub struct Segment {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Deserialize, Debug)]
pub struct Step {
    #[serde(rename = "type")]
    pub kind: u32,
    #[serde(default)]
    pub instruction: String,
    pub way_points: [usize; 2],
}

#[derive(Deserialize, Debug)]
pub struct Warning {
    pub code: u32,
    #[serde(default)]
    pub message: String,
}

pub fn maneuver_action(kind: u32) -> ManeuverAction {
    match kind {
        0 => ManeuverAction::LeftTurn,
        1 => ManeuverAction::RightTurn,
        2 => ManeuverAction::SharpLeftTurn,
        3 => ManeuverAction::SharpRightTurn,
        4 => ManeuverAction::SlightLeftTurn,
        5 => ManeuverAction::SlightRightTurn,
        6 => ManeuverAction::Continue,
        7 => ManeuverAction::EnterRoundabout,
        8 => ManeuverAction::ExitRoundabout,
        9 => ManeuverAction::LeftUTurn,
        10 => ManeuverAction::Arrive,
        11 => ManeuverAction::Depart,
        12 => ManeuverAction::KeepLeft,
        13 => ManeuverAction::KeepRight,
        other => ManeuverAction::Other(other),
    }
}

fn rounded(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

impl DirectionsResponse {
    /// Converts every returned route, keeping the engine's order.
    pub fn into_routes(self, departure: DateTime<Local>) -> Result<Vec<Route>, CoordinateError> {
        self.features
            .into_iter()
            .map(|feature| feature.into_route(departure))
            .collect()
    }
}

impl RouteFeature {
    pub fn into_route(self, departure: DateTime<Local>) -> Result<Route, CoordinateError> {
        let geometry = self
            .geometry
            .coordinates
            .iter()
            .map(|c| {
                let at = |i: usize| c.get(i).copied().unwrap_or(f64::NAN);
                GeoPoint::from_lon_lat([at(0), at(1)])
            })
            .collect::<Result<Vec<_>, _>>()?;

        let props = self.properties;
        let mut sections = Vec::with_capacity(props.segments.len());
        let mut clock = departure;

        for (i, segment) in props.segments.into_iter().enumerate() {
            let (from, to) = segment_bounds(i, &segment, &props.way_points, geometry.len());
            let point_at = |idx: usize| geometry.get(idx).copied();

            let maneuvers = segment
                .steps
                .iter()
                .filter_map(|step| {
                    point_at(step.way_points[0]).map(|coordinates| Maneuver {
                        text: step.instruction.clone(),
                        action: maneuver_action(step.kind),
                        coordinates,
                    })
                })
                .collect();

            let (Some(start), Some(end)) = (point_at(from), point_at(to)) else {
                log::warn!("Segment {} points outside the route geometry, skipping it", i);
                continue;
            };

            let duration_secs = rounded(segment.duration);
            let arrival = clock + Duration::seconds(duration_secs as i64);
            sections.push(Section {
                departure_place: Place {
                    map_matched_coordinates: start,
                },
                arrival_place: Place {
                    map_matched_coordinates: end,
                },
                departure_time: clock,
                arrival_time: arrival,
                length_in_meters: rounded(segment.distance),
                duration_secs,
                maneuvers,
                notices: Vec::new(),
            });
            clock = arrival;
        }

        // ORS reports warnings per route, not per segment.
        if let Some(first) = sections.first_mut() {
            first.notices = props
                .warnings
                .into_iter()
                .map(|w| Notice {
                    code: w.code,
                    message: w.message,
                })
                .collect();
        }

        Ok(Route {
            duration_secs: rounded(props.summary.duration),
            length_in_meters: rounded(props.summary.distance),
            geometry,
            sections,
        })
    }
}

/// Geometry index range covered by segment `i`.
fn segment_bounds(i: usize, segment: &Segment, way_points: &[usize], len: usize) -> (usize, usize) {
    if let (Some(&from), Some(&to)) = (way_points.get(i), way_points.get(i + 1)) {
        return (from, to);
    }
    let from = segment.steps.first().map(|s| s.way_points[0]).unwrap_or(0);
    let to = segment
        .steps
        .last()
        .map(|s| s.way_points[1])
        .unwrap_or(len.saturating_sub(1));
    (from, to)
}
