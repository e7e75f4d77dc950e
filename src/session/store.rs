//! Token storage abstraction.
//!
//! The session persists exactly two string entries, keyed `accessToken` and
//! `refreshToken`. Backends implement [`TokenStore`] so the session can run
//! against the OS keychain, a JSON file, or plain memory in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Token storage operation failed: {0}")]
    OperationFailed(String),

    #[error("Token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The two persisted credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    AccessToken,
    RefreshToken,
}

impl TokenKey {
    /// Storage key the entry is persisted under.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKey::AccessToken => "accessToken",
            TokenKey::RefreshToken => "refreshToken",
        }
    }
}

/// Persistent key/value storage for session tokens.
///
/// Implementations must treat removal of a missing entry as success.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: TokenKey) -> Result<Option<String>, StorageError>;

    fn set(&self, key: TokenKey, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: TokenKey) -> Result<(), StorageError>;

    /// Remove both tokens. Attempts both removals even if the first fails.
    fn clear(&self) -> Result<(), StorageError> {
        let access = self.remove(TokenKey::AccessToken);
        let refresh = self.remove(TokenKey::RefreshToken);
        access.and(refresh)
    }
}

/// In-process token store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<TokenKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given tokens.
    pub fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
        let mut entries = HashMap::new();
        if let Some(a) = access {
            entries.insert(TokenKey::AccessToken, a.to_string());
        }
        if let Some(r) = refresh {
            entries.insert(TokenKey::RefreshToken, r.to_string());
        }
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<TokenKey, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::OperationFailed("memory store lock poisoned".into()))
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: TokenKey) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(&key).cloned())
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: TokenKey) -> Result<(), StorageError> {
        self.lock()?.remove(&key);
        Ok(())
    }
}
