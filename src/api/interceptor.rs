//! Auth interceptors.
//!
//! The request side attaches the bearer token to protected requests. The
//! response side turns a 401/403 on a protected request into one refresh plus
//! one replay, and tears the session down when the refresh cannot succeed.

use super::client::{ApiClient, ApiResponse};
use super::public::is_public;
use super::request::ApiRequest;
use crate::error::ApiError;
use crate::navigation::ROOT;
use crate::services::user;
use crate::session::{RefreshState, Session};

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/user/refresh";

/// Attach `Authorization: Bearer <access token>` unless the path is public or
/// no access token is held. Never fails.
pub async fn authorize(request: &mut ApiRequest, session: &Session) {
    if is_public(&request.path) {
        request.bearer = None;
        return;
    }
    request.bearer = session.access_token().await;
}

/// Why a refresh attempt ended without a new access token.
enum RefreshFailure {
    /// No refresh token is stored.
    MissingToken,
    /// The refresh call itself failed.
    Call(ApiError),
    /// Another request's refresh already failed and ended the session while
    /// this one waited. Carries that request's terminal error.
    SessionEnded(ApiError),
}

impl ApiClient {
    /// Response interceptor for a failed request.
    pub(crate) async fn recover(
        &self,
        mut request: ApiRequest,
        error: ApiError,
    ) -> Result<ApiResponse, ApiError> {
        if !error.is_auth_failure() || is_public(&request.path) || request.retried {
            return Err(error);
        }
        request.retried = true;

        log::info!(
            "{} {} was rejected ({}), refreshing access token",
            request.method,
            request.path,
            error
        );

        let token = match self.refresh_access_token(request.bearer.as_deref(), &error).await {
            Ok(token) => token,
            Err(RefreshFailure::MissingToken) => return Err(error),
            Err(RefreshFailure::Call(refresh_error)) => return Err(refresh_error),
            Err(RefreshFailure::SessionEnded(terminal)) => return Err(terminal),
        };

        request.bearer = Some(token);
        // Replayed exactly once; its outcome goes back to the caller untouched.
        self.execute(&request).await
    }

    /// Obtain a fresh access token, running at most one refresh call at a time.
    ///
    /// `stale` is the token the failed request was sent with. If a concurrent
    /// refresh replaced it while we waited for the gate, that newer token is
    /// reused instead of refreshing again. If a concurrent refresh failed
    /// instead, the session is already gone and its terminal error is shared.
    async fn refresh_access_token(
        &self,
        stale: Option<&str>,
        original: &ApiError,
    ) -> Result<String, RefreshFailure> {
        let _gate = self.session.lock_refresh().await;

        match self.session.access_token().await {
            Some(current) if stale != Some(current.as_str()) => {
                log::debug!("Access token was refreshed concurrently, reusing it");
                return Ok(current);
            }
            None if stale.is_some() && self.session.state().await.is_terminal() => {
                log::debug!("Session ended while waiting for the refresh gate");
                let terminal = self
                    .terminal_error
                    .lock()
                    .await
                    .as_ref()
                    .map(ApiError::to_shared)
                    .unwrap_or_else(|| original.to_shared());
                return Err(RefreshFailure::SessionEnded(terminal));
            }
            _ => {}
        }

        let refresh_token = match self.session.refresh_token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                log::warn!("No refresh token available, ending session");
                self.end_session(original).await;
                return Err(RefreshFailure::MissingToken);
            }
            Err(e) => {
                log::warn!("Failed to read refresh token: {}", e);
                let error = ApiError::from(e);
                self.end_session(&error).await;
                return Err(RefreshFailure::Call(error));
            }
        };

        self.session.set_state(RefreshState::RefreshInFlight).await;

        match user::refresh_tokens(self, &refresh_token).await {
            Ok(access_token) => {
                if let Err(e) = self.session.set_access_token(&access_token).await {
                    log::warn!("Failed to persist refreshed access token: {}", e);
                    let error = ApiError::from(e);
                    self.end_session(&error).await;
                    return Err(RefreshFailure::Call(error));
                }
                self.session.set_state(RefreshState::Normal).await;
                log::info!("Access token refreshed");
                Ok(access_token)
            }
            Err(e) => {
                log::warn!("Token refresh failed: {}", e);
                self.end_session(&e).await;
                Err(RefreshFailure::Call(e))
            }
        }
    }

    /// Hard logout after an unrecoverable credential failure. Called with the
    /// refresh gate held; `cause` is handed to requests still waiting on it.
    async fn end_session(&self, cause: &ApiError) {
        *self.terminal_error.lock().await = Some(cause.to_shared());
        if let Err(e) = self.session.clear().await {
            log::warn!("Failed to clear stored tokens: {}", e);
        }
        self.session.set_state(RefreshState::Failed).await;
        self.navigator.navigate(ROOT);
    }
}
