// src/state/mod.rs
use std::time::{Duration, Instant};

use crate::controller::ControllerState;
use crate::dashboard::DashboardViewModel;

/// How long the error banner stays up before dismissing itself.
pub const BANNER_AUTO_DISMISS: Duration = Duration::from_secs(10);

/// The single user-visible error channel.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    pub message: String,
    shown_at: Instant,
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= BANNER_AUTO_DISMISS
    }
}

// Core application state
#[derive(Debug, Default)]
pub struct AppState {
    pub controller: ControllerState,
    pub dashboard: Option<DashboardViewModel>,
    pub banner: Option<ErrorBanner>,
    /// One-shot flag: scroll the dashboard into view on the next frame.
    pub scroll_to_dashboard: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_expires_after_ten_seconds() {
        let banner = ErrorBanner::new("boom");
        let now = Instant::now();
        assert!(!banner.expired(now));
        assert!(!banner.expired(now + Duration::from_secs(9)));
        assert!(banner.expired(now + BANNER_AUTO_DISMISS + Duration::from_millis(1)));
    }
}
