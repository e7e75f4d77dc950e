//! Assistant chat endpoint.

use crate::api::types::{ChatRequest, ChatResponse};
use crate::api::ApiClient;
use crate::error::ApiError;
use crate::validation;

/// POST /chat. Returns the assistant's reply.
pub async fn send_chat_message(client: &ApiClient, message: &str) -> Result<String, ApiError> {
    validation::require("message", message)?;
    let body = ChatRequest {
        message: message.trim().to_string(),
    };
    let resp: ChatResponse = client.post_json("/chat", &body).await?.data()?;
    Ok(resp.reply)
}
