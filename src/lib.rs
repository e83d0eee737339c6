pub mod sdk;

pub use sdk::config::EngineConfig;
pub use sdk::geo::{GeoPoint, Waypoint};
pub use sdk::map::{InMemoryScene, MapScene, OverlayManager, OverlaySet};
pub use sdk::present::{format_length, format_time, summarize, RouteSummary};
pub use sdk::routing::{
    BackendSelector, ConnectivitySignal, LocalOrsProvider, RemoteOrsProvider, Route,
    RouteOptions, RoutingClient, RoutingError, RoutingProvider,
};
pub use sdk::session::{Notification, RoutingSession};
