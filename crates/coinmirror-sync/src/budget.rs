//! Self-imposed request budget for the market-data provider.
//!
//! The courtesy delay between items is the primary pacing mechanism; this
//! limiter is the hard ceiling underneath it, converting budget exhaustion
//! into a typed rate-limit error instead of an upstream 429.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token-bucket request budget over a rolling window.
#[derive(Clone)]
pub struct RequestBudget {
    limiter: Arc<DirectRateLimiter>,
    suggested_wait: Duration,
}

impl RequestBudget {
    pub fn new(window: Duration, limit: u32) -> Self {
        let safe_limit = limit.max(1);
        let burst = NonZeroU32::new(safe_limit).expect("safe limit must be non-zero");

        let seconds_per_cell = (window.as_secs_f64() / f64::from(safe_limit)).max(0.001);
        let period = Duration::from_secs_f64(seconds_per_cell);
        let quota = Quota::with_period(period)
            .expect("period is always greater than zero")
            .allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            suggested_wait: period,
        }
    }

    /// Conservative default for a free-tier market-data key.
    pub fn provider_default() -> Self {
        Self::new(Duration::from_secs(60), 30)
    }

    /// Tries to take one request's worth of budget. On exhaustion returns
    /// the suggested wait before the next attempt.
    pub fn acquire(&self) -> Result<(), Duration> {
        if self.limiter.check().is_ok() {
            Ok(())
        } else {
            Err(self.suggested_wait)
        }
    }
}
