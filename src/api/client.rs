//! HTTP client shared by every service call.
//!
//! Headers are built per request from the current session state. The client
//! never holds default headers, so logging out cannot leave a stale
//! `Authorization` header behind.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use super::interceptor;
use super::request::{ApiRequest, FormPart, RequestBody};
use crate::config::Config;
use crate::error::ApiError;
use crate::navigation::Navigator;
use crate::session::Session;

/// Successful response with its body fully read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as `T` with no envelope check.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode a `{ success, message, ...data }` envelope.
    ///
    /// `success: false` becomes [`ApiError::Rejected`] with the server message.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let value: Value = serde_json::from_slice(&self.body)?;
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Request failed")
                .to_string();
            return Err(ApiError::Rejected(message));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// HTTP client wrapper for the car rental API.
///
/// Owns the base URL and the `reqwest` connection pool, and holds the session
/// it was constructed with. All requests pass through the auth interceptors.
pub struct ApiClient {
    http: Client,
    base_url: String,
    pub(crate) session: Arc<Session>,
    pub(crate) navigator: Arc<dyn Navigator>,
    /// Error that last ended the session, shared with requests that waited on
    /// the failed refresh.
    pub(crate) terminal_error: Mutex<Option<ApiError>>,
}

impl ApiClient {
    /// Create a client for `config.api_base_url`.
    pub fn new(config: &Config, session: Arc<Session>, navigator: Arc<dyn Navigator>) -> Self {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });
        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
            terminal_error: Mutex::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Send a request through both interceptors.
    ///
    /// The request interceptor attaches the bearer token for protected paths.
    /// On a 401/403 from a protected path the response interceptor refreshes
    /// the access token and replays the request once.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        interceptor::authorize(&mut request, &self.session).await;
        match self.execute(&request).await {
            Ok(response) => Ok(response),
            Err(error) => self.recover(request, error).await,
        }
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    /// POST with no body.
    pub async fn post_empty(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(path)).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        parts: Vec<FormPart>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(path).multipart(parts)).await
    }

    /// Perform exactly one HTTP exchange for `request`, as described.
    ///
    /// Non-success statuses are turned into [`ApiError::Status`] carrying the
    /// server's `message` when the body has one.
    pub(crate) async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path_and_query());
        log::debug!("{} {}", request.method, request.path);

        let mut builder = self.http.request(request.method.clone(), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(ref token) = request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(RequestBody::to_form(parts)?),
        };

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?.to_vec();

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("Request failed").to_string()
            });
            log::debug!("{} {} failed with {}", request.method, request.path, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(ApiResponse { status, body })
    }
}

/// Server-provided `message` from an error body, or the body text itself.
fn error_message(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(msg) = value.get("message").and_then(Value::as_str) {
            return Some(msg.to_string());
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: serde_json::Value) -> ApiResponse {
        ApiResponse {
            status: StatusCode::OK,
            body: serde_json::to_vec(&body).unwrap(),
        }
    }

    #[test]
    fn test_data_rejects_unsuccessful_envelope() {
        let resp = response(json!({ "success": false, "message": "Car not found" }));
        let err = resp.data::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Car not found"));
    }

    #[test]
    fn test_data_decodes_successful_envelope() {
        #[derive(serde::Deserialize)]
        struct Reply {
            reply: String,
        }
        let resp = response(json!({ "success": true, "reply": "Hi" }));
        assert_eq!(resp.data::<Reply>().unwrap().reply, "Hi");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(br#"{"success":false,"message":"jwt expired"}"#).as_deref(),
            Some("jwt expired")
        );
        assert_eq!(error_message(b"Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(error_message(b""), None);
    }
}
