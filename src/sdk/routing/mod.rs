pub mod client;
pub mod error;
pub mod provider;
pub mod route;
pub mod selector;
pub mod service;

pub use client::{PendingRoute, RouteOutcome, RoutingClient};
pub use error::{BackendError, RoutingError};
pub use provider::{LocalOrsProvider, RemoteOrsProvider};
pub use route::{
    Maneuver, ManeuverAction, Notice, Place, Route, RouteOptions, Section, TransportMode,
};
pub use selector::{Backend, BackendSelector, ConnectivitySignal};
pub use service::RoutingProvider;
