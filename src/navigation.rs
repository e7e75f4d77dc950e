//! Navigation side effects requested by the client core.
//!
//! The response interceptor forces a navigation to the application root when
//! the session cannot be recovered. Front ends decide what that means.

use std::sync::Mutex;

/// Application root: the landing page for logged-out users.
pub const ROOT: &str = "/";

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Logs the navigation. Used by the command line front end, where there is
/// no page to leave.
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        log::info!("Navigating to {}", path);
    }
}

/// Remembers every navigation, in order.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(path.to_string());
        }
    }
}
