//! Error type shared by the API client and the service layer.

use thiserror::Error;

use crate::session::StorageError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS or timeout failure before a response arrived.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },

    /// Server answered `{ success: false, message }`.
    #[error("{0}")]
    Rejected(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// HTTP status of a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// 401 and 403 both signal an expired or rejected access token.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Copy of this error for other callers failing on the same cause.
    ///
    /// Status and rejection errors are reproduced as is; anything else keeps
    /// only its message.
    pub fn to_shared(&self) -> ApiError {
        match self {
            ApiError::Status { status, message } => ApiError::Status {
                status: *status,
                message: message.clone(),
            },
            ApiError::Rejected(message) => ApiError::Rejected(message.clone()),
            other => ApiError::Rejected(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_statuses() {
        let unauthorized = ApiError::Status {
            status: 401,
            message: "jwt expired".into(),
        };
        let forbidden = ApiError::Status {
            status: 403,
            message: "forbidden".into(),
        };
        let missing = ApiError::Status {
            status: 404,
            message: "not found".into(),
        };
        assert!(unauthorized.is_auth_failure());
        assert!(forbidden.is_auth_failure());
        assert!(!missing.is_auth_failure());
        assert!(!ApiError::Rejected("nope".into()).is_auth_failure());
    }

    #[test]
    fn test_to_shared_keeps_status_and_message() {
        let original = ApiError::Status {
            status: 401,
            message: "Invalid refresh token".into(),
        };
        let copy = original.to_shared();
        assert_eq!(copy.status(), Some(401));
        assert_eq!(copy.to_string(), original.to_string());

        let storage = ApiError::from(StorageError::OperationFailed("disk full".into()));
        assert!(matches!(storage.to_shared(), ApiError::Rejected(ref m) if m == &storage.to_string()));
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "Server error 500: boom");
        assert_eq!(ApiError::Rejected("Car not found".into()).to_string(), "Car not found");
        let err: ApiError = ValidationError::PasswordMismatch.into();
        assert_eq!(err.to_string(), "Passwords do not match.");
    }
}
