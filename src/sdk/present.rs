//! Turns routes into the text the example app shows and logs.

use super::routing::route::{Route, Section};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    pub travel_time: String,
    pub length: String,
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Travel Time: {}, Length: {}", self.travel_time, self.length)
    }
}

pub fn summarize(route: &Route) -> RouteSummary {
    RouteSummary {
        travel_time: format_time(route.duration_secs),
        length: format_length(route.length_in_meters),
    }
}

/// `H:MM`, hours unpadded, minutes zero-padded. Leftover seconds are dropped.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}:{:02}", hours, minutes)
}

/// `KM.MMM km`, truncated to whole meters.
pub fn format_length(meters: u64) -> String {
    format!("{}.{:03} km", meters / 1000, meters % 1000)
}

/// One line per section: index, departure/arrival clock time, length, duration.
pub fn section_lines(route: &Route) -> Vec<String> {
    route
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            format!(
                "Route Section {}: departure {}, arrival {}, length {} m, duration {} s",
                i,
                section.departure_time.format("%H:%M"),
                section.arrival_time.format("%H:%M"),
                section.length_in_meters,
                section.duration_secs
            )
        })
        .collect()
}

pub fn maneuver_lines(section: &Section) -> Vec<String> {
    section
        .maneuvers
        .iter()
        .map(|m| format!("{}, Action: {}, Location: {}", m.text, m.action, m.coordinates))
        .collect()
}

/// Notice codes of every section, in section order.
pub fn notice_codes(route: &Route) -> Vec<u32> {
    route.notices().map(|n| n.code).collect()
}
