//! Client core for the car rental marketplace.
//!
//! `AuthService` owns the session and builds the shared `ApiClient`, whose
//! interceptors attach bearer tokens and transparently refresh them on
//! 401/403. The `services` modules are thin typed wrappers over the API.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod services;
pub mod session;
pub mod validation;

pub use api::{ApiClient, ApiRequest, ApiResponse};
pub use auth::AuthService;
pub use config::{Config, StoreKind};
pub use error::ApiError;
pub use session::{RefreshState, Session, TokenStore};
