use super::error::{BackendError, RoutingError};
use super::route::{Route, RouteOptions};
use super::service::RoutingProvider;
use crate::sdk::geo::Waypoint;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub type RouteOutcome = Result<Vec<Route>, RoutingError>;

/// Completion of a [`RoutingClient::calculate_route`] call. Resolves exactly
/// once, to a non-empty route list or to an error.
pub struct PendingRoute {
    id: u64,
    state: PendingState,
}

enum PendingState {
    Ready(Option<RouteOutcome>),
    Running(JoinHandle<RouteOutcome>),
}

impl PendingRoute {
    fn ready(id: u64, outcome: RouteOutcome) -> Self {
        Self {
            id,
            state: PendingState::Ready(Some(outcome)),
        }
    }

    pub fn request_id(&self) -> u64 {
        self.id
    }
}

impl Future for PendingRoute {
    type Output = RouteOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            PendingState::Ready(outcome) => match outcome.take() {
                Some(outcome) => Poll::Ready(outcome),
                None => panic!("PendingRoute polled after completion"),
            },
            PendingState::Running(handle) => match Pin::new(handle).poll(cx) {
                Poll::Pending => Poll::Pending,
                Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
                Poll::Ready(Err(join_error)) => {
                    log::error!("Route request #{} did not complete: {}", this.id, join_error);
                    Poll::Ready(Err(RoutingError::RoutingFailure(BackendError::TaskFailed(
                        join_error.to_string(),
                    ))))
                }
            },
        }
    }
}

/// Dispatches route calculations to a backend on the tokio blocking pool.
/// Requests share nothing but the id counter; there is no retry.
#[derive(Default)]
pub struct RoutingClient {
    next_id: AtomicU64,
}

impl RoutingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a route calculation on the current tokio runtime. Errors,
    /// including an invalid request or a missing runtime, arrive through the
    /// returned future.
    pub fn calculate_route(
        &self,
        waypoints: Vec<Waypoint>,
        options: RouteOptions,
        backend: Arc<dyn RoutingProvider>,
    ) -> PendingRoute {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        if waypoints.len() < 2 {
            log::warn!(
                "Route request #{} rejected: {} waypoint(s)",
                id,
                waypoints.len()
            );
            return PendingRoute::ready(
                id,
                Err(RoutingError::InvalidRequest {
                    waypoints: waypoints.len(),
                }),
            );
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Route request #{} has no async runtime: {}", id, e);
                return PendingRoute::ready(
                    id,
                    Err(RoutingError::EngineUnavailable(format!(
                        "no async runtime to run {}: {}",
                        backend.name(),
                        e
                    ))),
                );
            }
        };

        log::info!(
            "Route request #{}: {} waypoints using {}",
            id,
            waypoints.len(),
            backend.name()
        );
        let handle = runtime.spawn_blocking(move || {
            match backend.calculate_route(&waypoints, &options) {
                Ok(routes) if routes.is_empty() => {
                    Err(RoutingError::RoutingFailure(BackendError::NoRoute))
                }
                Ok(routes) => {
                    log::debug!("Route request #{} returned {} route(s)", id, routes.len());
                    Ok(routes)
                }
                Err(e) => {
                    log::debug!("Route request #{} failed: {}", id, e);
                    Err(e)
                }
            }
        });

        PendingRoute {
            id,
            state: PendingState::Running(handle),
        }
    }
}
