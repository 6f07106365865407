//! Reactive rate limiting for API requests
//!
//! Requests are sent unthrottled until the platform answers with a 429.
//! From then on every request of the same kind waits for a governor permit.
//! Reads and writes are paced separately.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::Method;

/// Kind of request, for pacing purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// GET requests
    Read,
    /// POST, PUT and DELETE requests
    Write,
}

impl RequestKind {
    pub fn from_method(method: &Method) -> Self {
        if *method == Method::GET || *method == Method::HEAD {
            RequestKind::Read
        } else {
            RequestKind::Write
        }
    }

    /// Requests per second once throttling is active
    pub fn rate_limit(&self) -> u32 {
        match self {
            RequestKind::Read => 10,
            RequestKind::Write => 2,
        }
    }
}

/// Limiter for one request kind, dormant until activated.
pub struct KindRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    active: AtomicBool,
    kind: RequestKind,
}

impl KindRateLimiter {
    pub fn new(kind: RequestKind) -> Self {
        let rate = NonZeroU32::new(kind.rate_limit()).unwrap_or(NonZeroU32::MIN);

        Self {
            limiter: RateLimiter::direct(Quota::per_second(rate)),
            active: AtomicBool::new(false),
            kind,
        }
    }

    /// Activate throttling (called on 429).
    pub fn activate(&self) {
        let was_active = self.active.swap(true, Ordering::SeqCst);
        if !was_active {
            debug!("Rate limiting activated for {:?} requests", self.kind);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait for a permit if throttling is active.
    pub async fn wait_if_active(&self) {
        if self.is_active() {
            debug!("Waiting for rate limiter {:?}", self.kind);
            self.limiter.until_ready().await;
        }
    }
}

/// Read and write limiters together
pub struct RateLimiterSet {
    read: KindRateLimiter,
    write: KindRateLimiter,
}

impl Default for RateLimiterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterSet {
    pub fn new() -> Self {
        Self {
            read: KindRateLimiter::new(RequestKind::Read),
            write: KindRateLimiter::new(RequestKind::Write),
        }
    }

    fn get(&self, kind: RequestKind) -> &KindRateLimiter {
        match kind {
            RequestKind::Read => &self.read,
            RequestKind::Write => &self.write,
        }
    }

    pub async fn wait_for(&self, kind: RequestKind) {
        self.get(kind).wait_if_active().await;
    }

    pub fn activate(&self, kind: RequestKind) {
        self.get(kind).activate();
    }

    pub fn is_active(&self, kind: RequestKind) -> bool {
        self.get(kind).is_active()
    }
}
