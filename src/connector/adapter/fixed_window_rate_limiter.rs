use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::application::RateLimiter;

pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 10;

struct WindowSlot {
    window_start: Instant,
    count: u32,
}

/// Process-local fixed-window rate limiter keyed by caller identity.
///
/// The service is stateless and single-process, so per-source counters live
/// in a `Mutex<HashMap>`. Windows reset lazily on the next acquire after
/// they expire; idle keys are dropped at that point to bound the map.
pub struct FixedWindowRateLimiter {
    max_per_window: u32,
    window: Duration,
    slots: Mutex<HashMap<String, WindowSlot>>,
}

impl FixedWindowRateLimiter {
    pub fn new(max_per_window: u32, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn per_minute(max_per_minute: u32) -> Self {
        Self::new(max_per_minute, Duration::from_secs(60))
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn try_acquire(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut slots = match self.slots.lock() {
            Ok(guard) => guard,
            // A poisoned lock means another acquire panicked; failing open
            // keeps the dispenser available.
            Err(poisoned) => poisoned.into_inner(),
        };

        slots.retain(|_, slot| now.duration_since(slot.window_start) < self.window);

        let slot = slots.entry(key.to_string()).or_insert(WindowSlot {
            window_start: now,
            count: 0,
        });

        if slot.count >= self.max_per_window {
            debug!("rate limit window exhausted for {key}");
            return false;
        }

        slot.count += 1;
        true
    }
}
