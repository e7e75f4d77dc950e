//! Refresh state machine for the session.
//!
//! Tracks where the response interceptor is in the token refresh cycle.

/// All states of the token refresh cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshState {
    /// Requests go out with the current access token.
    #[default]
    Normal,
    /// A refresh call is running; other failing requests wait on it.
    RefreshInFlight,
    /// The last refresh failed and the session was cleared.
    Failed,
}

impl RefreshState {
    pub fn label(&self) -> &'static str {
        match self {
            RefreshState::Normal => "Normal",
            RefreshState::RefreshInFlight => "Refreshing...",
            RefreshState::Failed => "Session expired",
        }
    }

    /// `true` once the session was torn down by a failed refresh.
    ///
    /// A later successful login moves the session back to `Normal`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RefreshState::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(RefreshState::Normal.label(), "Normal");
        assert_eq!(RefreshState::RefreshInFlight.label(), "Refreshing...");
        assert_eq!(RefreshState::Failed.label(), "Session expired");
    }

    #[test]
    fn test_is_terminal() {
        assert!(!RefreshState::Normal.is_terminal());
        assert!(!RefreshState::RefreshInFlight.is_terminal());
        assert!(RefreshState::Failed.is_terminal());
        assert_eq!(RefreshState::default(), RefreshState::Normal);
    }
}
