use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one admission check.
///
/// Carries the metadata the HTTP layer exposes through the
/// `X-RateLimit-*` headers, on admitted and denied requests alike.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Configured maximum for the window.
    pub limit: usize,
    /// Requests left in the current window (0 when denied).
    pub remaining: usize,
    /// Instant at which the oldest retained request leaves the window.
    /// `None` when the caller has no retained requests.
    pub reset_at: Option<DateTime<Utc>>,
}

impl Decision {
    /// An unconditional admission (limiter disabled).
    pub fn unlimited(limit: usize) -> Self {
        Self {
            allowed: true,
            limit,
            remaining: limit,
            reset_at: None,
        }
    }
}
