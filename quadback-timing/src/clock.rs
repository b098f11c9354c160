use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Capability for reading session time and pacing ticks. Injected into
/// the engine so trials carry timestamps without the engine owning a
/// clock, and so tests can run on a manual clock.
pub trait Clock: Clone + Send + Sync {
    /// Milliseconds since an arbitrary monotonic origin.
    fn now_ms(&self) -> u64;
    fn sleep(&self, d: Duration);
}

/// Wall clock backed by `Instant`.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep(&self, d: Duration) {
        thread::sleep(d);
    }
}

/// Test clock. `sleep` advances time instead of blocking; clones share
/// the same underlying instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    fn sleep(&self, d: Duration) {
        self.advance_ms(d.as_millis() as u64);
    }
}
