use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for one admission-control window.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Maximum admitted requests per rolling window.
    pub max_requests: usize,
    /// Duration of the rolling window.
    pub window: Duration,
    /// When `false`, every call is admitted unconditionally and recorded
    /// state is neither consulted nor mutated. Existing state is preserved
    /// so the limiter resumes cleanly when re-enabled.
    pub enabled: bool,
}

impl LimiterConfig {
    /// Create a configuration with the limiter enabled.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            enabled: true,
        }
    }

    /// Generous window for public transparency routes.
    pub fn public_default() -> Self {
        Self::new(100, Duration::from_secs(60))
    }

    /// Strict window for administrative routes.
    pub fn admin_default() -> Self {
        Self::new(20, Duration::from_secs(60))
    }
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self::public_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let public = LimiterConfig::public_default();
        assert_eq!(public.max_requests, 100);
        assert_eq!(public.window, Duration::from_secs(60));
        assert!(public.enabled);

        let admin = LimiterConfig::admin_default();
        assert!(admin.max_requests < public.max_requests);
    }
}
