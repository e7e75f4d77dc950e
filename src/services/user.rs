//! Account and public catalog endpoints under `/user`.

use crate::api::types::{
    AuthResponse, CarsPage, ForgetPasswordRequest, LoginRequest, MessageResponse,
    RefreshRequest, RefreshResponse, RegisterRequest, ResetPasswordRequest, User, UserResponse,
};
use crate::api::interceptor::REFRESH_PATH;
use crate::api::{ApiClient, ApiRequest};
use crate::error::ApiError;

/// Cars per page on the listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Header carrying the emailed password reset token.
pub const RESET_TOKEN_HEADER: &str = "x-reset-token";

/// POST /user/login
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let body = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    client.post_json("/user/login", &body).await?.data()
}

/// POST /user/register
pub async fn register(
    client: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<AuthResponse, ApiError> {
    let body = RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    client.post_json("/user/register", &body).await?.data()
}

/// GET /user/cars?page=&limit=
pub async fn get_cars(client: &ApiClient, page: u32, limit: u32) -> Result<CarsPage, ApiError> {
    let request = ApiRequest::get("/user/cars")
        .query("page", page.max(1))
        .query("limit", limit);
    client.send(request).await?.data()
}

/// GET /user/data
pub async fn get_user(client: &ApiClient) -> Result<User, ApiError> {
    let resp: UserResponse = client.get("/user/data").await?.data()?;
    Ok(resp.user)
}

/// POST /user/refresh
///
/// Exchanges a refresh token for an access token without touching the session.
/// The endpoint is public, so the request skips both interceptors; the response
/// interceptor calls this for its own refresh.
pub async fn refresh_tokens(client: &ApiClient, refresh_token: &str) -> Result<String, ApiError> {
    let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest {
        token: refresh_token.to_string(),
    })?;
    let resp: RefreshResponse = client.execute(&request).await?.data()?;
    Ok(resp.access_token)
}

/// POST /user/forget-password
pub async fn send_password_reset_email(
    client: &ApiClient,
    email: &str,
) -> Result<MessageResponse, ApiError> {
    let body = ForgetPasswordRequest {
        email: email.to_string(),
    };
    client.post_json("/user/forget-password", &body).await?.data()
}

/// PUT /user/reset-password with the reset token in `x-reset-token`.
pub async fn reset_password(
    client: &ApiClient,
    token: &str,
    new_password: &str,
) -> Result<MessageResponse, ApiError> {
    let request = ApiRequest::put("/user/reset-password")
        .header(RESET_TOKEN_HEADER, token)
        .json(&ResetPasswordRequest {
            new_password: new_password.to_string(),
        })?;
    client.send(request).await?.data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Config;
    use crate::navigation::LogNavigator;
    use crate::session::{MemoryStore, Session};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(
            &Config::new(&server.uri()),
            Arc::new(Session::in_memory()),
            Arc::new(LogNavigator),
        )
    }

    #[tokio::test]
    async fn test_get_cars_sends_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/cars"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "cars": [{ "_id": "c1", "brand": "Kia", "model": "Rio" }],
                "pagination": { "totalPages": 3, "currentPage": 2, "totalCars": 14 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = get_cars(&client_for(&server), 2, DEFAULT_PAGE_SIZE).await.unwrap();
        assert_eq!(page.cars.len(), 1);
        assert_eq!(page.pagination.total_pages, 3);
        server.verify().await;
    }

    #[tokio::test]
    async fn test_reset_password_sends_reset_header() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/user/reset-password"))
            .and(header("x-reset-token", "tok-123"))
            .and(body_json(json!({ "newPassword": "secret1" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "message": "Password updated" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let resp = reset_password(&client_for(&server), "tok-123", "secret1").await.unwrap();
        assert_eq!(resp.message.as_deref(), Some("Password updated"));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_login_rejection_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": false, "message": "User not found" })),
            )
            .mount(&server)
            .await;

        let err = login(&client_for(&server), "who@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "User not found"));
    }

    #[tokio::test]
    async fn test_refresh_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/refresh"))
            .and(body_json(json!({ "token": "R1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "A2" })))
            .mount(&server)
            .await;

        let token = refresh_tokens(&client_for(&server), "R1").await.unwrap();
        assert_eq!(token, "A2");
    }

    #[tokio::test]
    async fn test_refresh_tokens_never_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "A2" })))
            .expect(1)
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::with_tokens(Some("A1"), Some("R1")));
        let client = ApiClient::new(
            &Config::new(&server.uri()),
            Arc::new(Session::restore(store).unwrap()),
            Arc::new(LogNavigator),
        );

        assert_eq!(refresh_tokens(&client, "R1").await.unwrap(), "A2");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
        // Exchanging tokens leaves the session alone
        assert_eq!(client.session().access_token().await.as_deref(), Some("A1"));
        server.verify().await;
    }
}
