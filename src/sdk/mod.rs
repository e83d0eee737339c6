pub mod config;
pub mod geo;
pub mod map;
pub mod present;
pub mod routing;
pub mod session;
pub mod util;
