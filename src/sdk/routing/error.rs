use serde::Deserialize;
use thiserror::Error;

// Helper structs to parse the JSON error response from ORS
#[derive(Deserialize, Debug)]
pub struct OrsErrorDetail {
    pub code: u32,
    #[serde(default)]
    pub message: String,
}
#[derive(Deserialize, Debug)]
pub struct OrsErrorPayload {
    pub error: OrsErrorDetail,
}

/// ORS error code for "Could not find routable point within radius".
pub const ORS_UNROUTABLE_POINT: u32 = 2010;

/// Why a backend could not produce a route. Callers normally treat this as
/// opaque; it is kept structured for logging.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("A point was not routable on the road network")]
    UnroutablePoint,

    // This variant holds the structured error from the API
    #[error("API Error (Code {code}): {message}")]
    Api { code: u32, message: String },

    // A fallback for when we get an error that isn't in the expected JSON format
    #[error("Unstructured API Error: {0}")]
    RawApi(String),

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No route found in success response")]
    NoRoute,

    #[error("Routing task failed: {0}")]
    TaskFailed(String),
}

impl From<OrsErrorPayload> for BackendError {
    fn from(payload: OrsErrorPayload) -> Self {
        if payload.error.code == ORS_UNROUTABLE_POINT {
            BackendError::UnroutablePoint
        } else {
            BackendError::Api {
                code: payload.error.code,
                message: payload.error.message,
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("A route needs at least 2 waypoints, got {waypoints}")]
    InvalidRequest { waypoints: usize },

    #[error("Routing failed: {0}")]
    RoutingFailure(#[from] BackendError),

    #[error("Routing engine unavailable: {0}")]
    EngineUnavailable(String),
}
