use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// The public ORS plan allows 40 directions requests per minute.
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 40;

pub fn ors_limiter(per_minute: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)))
}

/// Blocks the current thread until the limiter grants a cell.
pub fn wait(limiter: &Limiter) {
    let clock = DefaultClock::default();
    while let Err(not_until) = limiter.check() {
        std::thread::sleep(not_until.wait_time_from(clock.now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn wait_returns_immediately_under_quota() {
        let limiter = ors_limiter(NonZeroU32::new(60).unwrap());
        let started = Instant::now();
        wait(&limiter);
        assert!(started.elapsed() < Duration::from_millis(500));
    }
}
