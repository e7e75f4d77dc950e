//! Authentication session: token storage plus the in-memory access token.
//!
//! The `Session` is the only owner of credential state. It is created by the
//! auth service and injected into the `ApiClient`, which reads the access token
//! per request and drives refreshes through it.

pub mod file;
#[cfg(feature = "keyring-store")]
pub mod keychain;
pub mod status;
pub mod store;

pub use file::FileStore;
#[cfg(feature = "keyring-store")]
pub use keychain::KeyringStore;
pub use status::RefreshState;
pub use store::{MemoryStore, StorageError, TokenKey, TokenStore};

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, RwLock};
use zeroize::Zeroize;

pub struct Session {
    store: Arc<dyn TokenStore>,

    /// In-memory mirror of the persisted access token.
    access_token: RwLock<Option<String>>,

    state: RwLock<RefreshState>,

    /// Held for the whole duration of a refresh call so at most one runs.
    refresh_gate: Mutex<()>,
}

impl Session {
    /// Build a session over `store`, loading any persisted access token.
    pub fn restore(store: Arc<dyn TokenStore>) -> Result<Self, StorageError> {
        let access_token = store.get(TokenKey::AccessToken)?;
        if access_token.is_some() {
            log::debug!("Restored persisted access token");
        }
        Ok(Self {
            store,
            access_token: RwLock::new(access_token),
            state: RwLock::new(RefreshState::Normal),
            refresh_gate: Mutex::new(()),
        })
    }

    /// Session over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            access_token: RwLock::new(None),
            state: RwLock::new(RefreshState::Normal),
            refresh_gate: Mutex::new(()),
        }
    }

    pub async fn access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    /// The refresh token is never mirrored in memory; read it from storage.
    pub fn refresh_token(&self) -> Result<Option<String>, StorageError> {
        self.store.get(TokenKey::RefreshToken)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    pub async fn state(&self) -> RefreshState {
        *self.state.read().await
    }

    /// Persist a freshly issued token pair (login or register).
    pub async fn store_tokens(&self, access: &str, refresh: &str) -> Result<(), StorageError> {
        self.store.set(TokenKey::AccessToken, access)?;
        self.store.set(TokenKey::RefreshToken, refresh)?;
        *self.access_token.write().await = Some(access.to_string());
        *self.state.write().await = RefreshState::Normal;
        Ok(())
    }

    /// Persist a refreshed access token. The refresh token is left as is.
    pub async fn set_access_token(&self, access: &str) -> Result<(), StorageError> {
        self.store.set(TokenKey::AccessToken, access)?;
        *self.access_token.write().await = Some(access.to_string());
        Ok(())
    }

    /// Drop both tokens from memory and storage.
    pub async fn clear(&self) -> Result<(), StorageError> {
        {
            let mut token = self.access_token.write().await;
            if let Some(ref mut t) = *token {
                t.zeroize();
            }
            *token = None;
        }
        self.store.clear()
    }

    pub(crate) async fn set_state(&self, state: RefreshState) {
        let mut current = self.state.write().await;
        if *current != state {
            log::debug!("Refresh state: {} -> {}", current.label(), state.label());
        }
        *current = state;
    }

    pub(crate) async fn lock_refresh(&self) -> MutexGuard<'_, ()> {
        self.refresh_gate.lock().await
    }
}
