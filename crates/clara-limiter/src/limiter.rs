use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration as ChronoDuration, Utc};

use crate::config::LimiterConfig;
use crate::decision::Decision;

/// Sliding-window rate limiter keyed by caller identifier.
///
/// One mutex guards the whole prune–count–append sequence: splitting the
/// read from the write would let two concurrent callers both observe
/// `count == N - 1` and push the admitted count past the limit.
pub struct RateLimiter {
    inner: Mutex<LimiterState>,
}

struct LimiterState {
    config: LimiterConfig,
    /// Caller identifier -> admitted-request timestamps, oldest first.
    /// Pruned lazily on each evaluation, never proactively.
    windows: HashMap<String, Vec<DateTime<Utc>>>,
}

impl RateLimiter {
    /// Create a limiter with the given configuration.
    pub fn new(config: LimiterConfig) -> Self {
        Self {
            inner: Mutex::new(LimiterState {
                config,
                windows: HashMap::new(),
            }),
        }
    }

    /// Decide whether the caller's request is admitted, recording it if so.
    pub fn admit(&self, caller: &str) -> Decision {
        self.admit_at(caller, Utc::now())
    }

    /// [`admit`](Self::admit) with an explicit evaluation instant.
    ///
    /// Exposed so tests can drive the clock; production callers use
    /// [`admit`](Self::admit).
    pub fn admit_at(&self, caller: &str, now: DateTime<Utc>) -> Decision {
        let mut state = self.inner.lock().expect("lock poisoned");

        if !state.config.enabled {
            return Decision::unlimited(state.config.max_requests);
        }

        let limit = state.config.max_requests;
        let window = ChronoDuration::from_std(state.config.window)
            .unwrap_or_else(|_| ChronoDuration::seconds(60));
        let cutoff = now - window;

        let timestamps = state.windows.entry(caller.to_string()).or_default();
        timestamps.retain(|&t| t > cutoff);

        if timestamps.len() >= limit {
            let reset_at = timestamps.first().map(|&earliest| earliest + window);
            tracing::warn!(caller, limit, "admission denied");
            return Decision {
                allowed: false,
                limit,
                remaining: 0,
                reset_at,
            };
        }

        timestamps.push(now);
        let remaining = limit - timestamps.len();
        Decision {
            allowed: true,
            limit,
            remaining,
            reset_at: timestamps.first().map(|&earliest| earliest + window),
        }
    }

    /// Switch the limiter on or off at runtime.
    ///
    /// Disabling does not discard recorded windows; they resume pruning
    /// normally when the limiter is re-enabled.
    pub fn set_enabled(&self, enabled: bool) {
        let mut state = self.inner.lock().expect("lock poisoned");
        state.config.enabled = enabled;
    }

    /// Returns `true` if the limiter is currently enforcing its window.
    pub fn is_enabled(&self) -> bool {
        self.inner.lock().expect("lock poisoned").config.enabled
    }

    /// Per-caller recorded request counts (for debugging endpoints).
    ///
    /// Counts include stale timestamps not yet pruned; pruning happens
    /// only on evaluation.
    pub fn counts(&self) -> HashMap<String, usize> {
        let state = self.inner.lock().expect("lock poisoned");
        state
            .windows
            .iter()
            .map(|(caller, timestamps)| (caller.clone(), timestamps.len()))
            .collect()
    }
}
