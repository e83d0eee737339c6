use super::types::DirectionsResponse;
use crate::sdk::geo::Waypoint;
use crate::sdk::routing::error::{BackendError, OrsErrorPayload, RoutingError};
use crate::sdk::routing::route::{Route, RouteOptions};
use chrono::Local;
use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::{json, Map, Value};
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Builds the blocking HTTP client shared by both ORS providers.
pub fn build_client() -> Result<Client, RoutingError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| RoutingError::EngineUnavailable(format!("HTTP client: {}", e)))
}

/// Checks that `base_url` is an absolute http(s) URL and strips any trailing slash.
pub fn parse_base_url(base_url: &str) -> Result<String, RoutingError> {
    let url = Url::parse(base_url)
        .map_err(|e| RoutingError::EngineUnavailable(format!("invalid URL {}: {}", base_url, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(RoutingError::EngineUnavailable(format!(
            "unsupported URL scheme in {}",
            base_url
        )));
    }
    Ok(base_url.trim_end_matches('/').to_string())
}

pub fn directions_url(base_url: &str, options: &RouteOptions) -> String {
    format!(
        "{}/v2/directions/{}/geojson",
        base_url,
        options.transport_mode.ors_profile()
    )
}

/// Body keys that always come from the request itself, never from extras.
const RESERVED_KEYS: [&str; 2] = ["coordinates", "instructions"];

/// Request body: every extra option plus the coordinates in `[lon, lat]` order.
pub fn directions_body(waypoints: &[Waypoint], options: &RouteOptions) -> Value {
    let coordinates: Vec<[f64; 2]> = waypoints
        .iter()
        .map(|w| w.coordinates.to_lon_lat())
        .collect();

    let mut body = Map::new();
    for (key, value) in &options.extra {
        if RESERVED_KEYS.contains(&key.as_str()) {
            log::warn!("Ignoring route option '{}', it is set from the request", key);
            continue;
        }
        body.insert(key.clone(), value.clone());
    }
    body.insert("coordinates".to_string(), json!(coordinates));
    body.insert("instructions".to_string(), Value::Bool(true));
    Value::Object(body)
}

/// Sends a directions request and maps the response into routes.
pub fn post_directions(
    client: &Client,
    url: &str,
    api_key: Option<&str>,
    waypoints: &[Waypoint],
    options: &RouteOptions,
) -> Result<Vec<Route>, BackendError> {
    let body = directions_body(waypoints, options);
    let mut request = client.post(url).json(&body);
    if let Some(key) = api_key {
        request = request.header("Authorization", key);
    }

    let response = match request.send() {
        Ok(resp) => resp,
        Err(e) => {
            log::error!(
                "Failed to send POST request. URL: {}\nBody: {}\nError: {}",
                url,
                body,
                e
            );
            return Err(BackendError::Request(e));
        }
    };

    let status = response.status();
    let text = response.text()?;

    if !status.is_success() {
        // Try to parse the structured error first
        if let Ok(payload) = serde_json::from_str::<OrsErrorPayload>(&text) {
            return Err(BackendError::from(payload));
        }
        log::error!(
            "API returned non-success status: {}. Unparseable Body: {}",
            status,
            text
        );
        return Err(BackendError::RawApi(text));
    }

    let directions: DirectionsResponse = serde_json::from_str(&text).map_err(|e| {
        log::error!(
            "Failed to parse DirectionsResponse. URL: {}\nError: {}. Body: {}",
            url,
            e,
            text
        );
        e
    })?;

    let departure = options.departure_time.unwrap_or_else(Local::now);
    let routes = directions.into_routes(departure).map_err(|e| {
        log::error!("Route geometry from {} is not valid: {}", url, e);
        BackendError::RawApi(e.to_string())
    })?;

    if routes.is_empty() {
        return Err(BackendError::NoRoute);
    }
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::geo::GeoPoint;
    use crate::sdk::routing::route::TransportMode;

    #[test]
    fn body_uses_lon_lat_and_merges_extras() {
        let waypoints = [
            Waypoint::new(GeoPoint::new(52.5, 13.4).unwrap()),
            Waypoint::new(GeoPoint::new(52.6, 13.5).unwrap()),
        ];
        let options = RouteOptions::car().with_option("preference", json!("shortest"));
        let body = directions_body(&waypoints, &options);
        assert_eq!(body["coordinates"], json!([[13.4, 52.5], [13.5, 52.6]]));
        assert_eq!(body["instructions"], json!(true));
        assert_eq!(body["preference"], json!("shortest"));
    }

    #[test]
    fn extras_cannot_replace_coordinates_or_instructions() {
        let waypoints = [
            Waypoint::new(GeoPoint::new(1.0, 1.0).unwrap()),
            Waypoint::new(GeoPoint::new(2.0, 2.0).unwrap()),
        ];
        let options = RouteOptions::car()
            .with_option("coordinates", json!([[0.0, 0.0]]))
            .with_option("instructions", json!(false))
            .with_option("units", json!("m"));
        let body = directions_body(&waypoints, &options);
        assert_eq!(body["coordinates"], json!([[1.0, 1.0], [2.0, 2.0]]));
        assert_eq!(body["instructions"], json!(true));
        assert_eq!(body["units"], json!("m"));
    }

    #[test]
    fn url_follows_profile() {
        let options = RouteOptions::car().with_mode(TransportMode::Truck);
        assert_eq!(
            directions_url("http://localhost:8080/ors", &options),
            "http://localhost:8080/ors/v2/directions/driving-hgv/geojson"
        );
    }

    #[test]
    fn base_url_validation() {
        assert_eq!(
            parse_base_url("http://localhost:8080/ors/").unwrap(),
            "http://localhost:8080/ors"
        );
        assert!(matches!(
            parse_base_url("not a url"),
            Err(RoutingError::EngineUnavailable(_))
        ));
        assert!(parse_base_url("ftp://example.org").is_err());
    }
}
