//! Authentication service.
//!
//! Owns the `Session` and the shared `ApiClient` built over it. Login,
//! register and logout are the only places tokens are created or dropped
//! outside the refresh interceptor.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::types::User;
use crate::api::ApiClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::navigation::{Navigator, ROOT};
use crate::services::{owner, user};
use crate::session::{Session, StorageError, TokenStore};
use crate::validation;

pub struct AuthService {
    api: Arc<ApiClient>,
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,

    /// Profile of the logged-in user, once fetched.
    user: RwLock<Option<User>>,
}

impl AuthService {
    /// Restore the session from `store` and build the API client over it.
    pub fn new(
        config: &Config,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, StorageError> {
        let session = Arc::new(Session::restore(store)?);
        let api = Arc::new(ApiClient::new(config, session.clone(), navigator.clone()));
        Ok(Self {
            api,
            session,
            navigator,
            user: RwLock::new(None),
        })
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Log in and persist the issued token pair.
    ///
    /// Returns the server's greeting message, if any.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<String>, ApiError> {
        validation::require("email", email)?;
        validation::require("password", password)?;

        log::info!("Logging in");
        let resp = user::login(&self.api, email.trim(), password).await?;
        self.session
            .store_tokens(&resp.access_token, &resp.refresh_token)
            .await?;
        *self.user.write().await = None;
        log::info!("Login complete");
        Ok(resp.message)
    }

    /// Create an account and persist the issued token pair.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<String>, ApiError> {
        validation::require("name", name)?;
        validation::require("email", email)?;
        validation::password(password)?;

        log::info!("Registering new account");
        let resp = user::register(&self.api, name.trim(), email.trim(), password).await?;
        self.session
            .store_tokens(&resp.access_token, &resp.refresh_token)
            .await?;
        *self.user.write().await = None;
        Ok(resp.message)
    }

    /// Load the current user's profile.
    ///
    /// A `{ success: false }` answer means the session is not usable; the
    /// front end is sent back to the root.
    pub async fn fetch_user(&self) -> Result<User, ApiError> {
        match user::get_user(&self.api).await {
            Ok(profile) => {
                *self.user.write().await = Some(profile.clone());
                Ok(profile)
            }
            Err(ApiError::Rejected(message)) => {
                self.navigator.navigate(ROOT);
                Err(ApiError::Rejected(message))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn is_owner(&self) -> bool {
        self.user
            .read()
            .await
            .as_ref()
            .map(User::is_owner)
            .unwrap_or(false)
    }

    /// Drop both tokens and the cached profile, then return to the root.
    pub async fn logout(&self) -> Result<(), ApiError> {
        log::info!("Logging out");
        *self.user.write().await = None;
        self.session.clear().await?;
        self.navigator.navigate(ROOT);
        log::info!("Logout complete");
        Ok(())
    }

    /// Ask the server to email a password reset link.
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<String>, ApiError> {
        validation::require("email address", email)?;
        let resp = user::send_password_reset_email(&self.api, email.trim()).await?;
        Ok(resp.message)
    }

    /// Set a new password using the emailed reset token.
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Option<String>, ApiError> {
        validation::require("reset token", token)?;
        validation::new_password(password, confirm)?;
        let resp = user::reset_password(&self.api, token.trim(), password).await?;
        Ok(resp.message)
    }

    /// Upgrade the account to an owner account and reload the profile.
    pub async fn become_owner(&self) -> Result<User, ApiError> {
        owner::change_role_to_owner(&self.api).await?;
        self.fetch_user().await
    }
}
