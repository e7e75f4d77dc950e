//! API client module for the car rental marketplace.
//!
//! Provides the shared HTTP client, the auth interceptors that attach and
//! refresh bearer tokens, and request/response types matching the backend API.

pub mod client;
pub mod interceptor;
pub mod public;
pub mod request;
pub mod types;

pub use client::{ApiClient, ApiResponse};
pub use request::{ApiRequest, FormPart, FormValue, RequestBody};
