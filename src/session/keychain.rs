//! Keychain-backed token storage.
//!
//! Uses the `keyring` crate so tokens live in the OS credential store
//! (macOS Keychain, Secret Service, Windows Credential Manager), never on disk.

use keyring::Entry;

use super::store::{StorageError, TokenKey, TokenStore};

/// Keychain service name for the client's entries.
pub const SERVICE_NAME: &str = "com.carrental.client";

impl From<keyring::Error> for StorageError {
    fn from(err: keyring::Error) -> Self {
        StorageError::OperationFailed(err.to_string())
    }
}

/// One keychain entry per token, all under the same service name.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Use a custom service name (separate profiles, integration runs).
    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, key: TokenKey) -> Result<Entry, StorageError> {
        Ok(Entry::new(&self.service, key.as_str())?)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for KeyringStore {
    /// Returns `None` if no entry exists (never logged in, or logged out).
    fn get(&self, key: TokenKey) -> Result<Option<String>, StorageError> {
        match self.entry(key)?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<(), StorageError> {
        self.entry(key)?.set_password(value)?;
        Ok(())
    }

    fn remove(&self, key: TokenKey) -> Result<(), StorageError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(StorageError::from(e)),
        }
    }
}
