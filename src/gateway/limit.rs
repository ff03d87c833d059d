//! Per-client fixed-window rate limiting.

use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

/// Fixed-window request counter keyed by client IP.
///
/// Counters live in a TTL cache: a client's window starts at its first
/// request and the counter evaporates when the window elapses. Cheap enough
/// to sit in front of every submission without a middleware layer.
#[derive(Clone)]
pub struct RateLimiter {
    hits: Cache<IpAddr, Arc<AtomicU32>>,
    limit: u32,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    /// At most `limit` requests per `window` per client IP.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            hits: Cache::builder()
                .time_to_live(window)
                .max_capacity(10_000)
                .build(),
            limit,
        }
    }

    /// Convenience for the common per-minute configuration.
    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Records one request from `client` and returns `true` if it is within
    /// the window's budget.
    pub fn allow(&self, client: IpAddr) -> bool {
        let counter = self
            .hits
            .get_with(client, || Arc::new(AtomicU32::new(0)));
        let used = counter.fetch_add(1, Ordering::Relaxed);
        let allowed = used < self.limit;
        if !allowed {
            debug!(%client, used, limit = self.limit, "Rate limit exceeded");
        }
        allowed
    }
}
