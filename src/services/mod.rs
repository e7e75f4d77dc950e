//! Typed wrappers over the API endpoints, one module per resource.
//!
//! Each function performs a single call through the shared `ApiClient` and
//! decodes the `{ success, message, ... }` envelope.

pub mod bookings;
pub mod chat;
pub mod owner;
pub mod user;
