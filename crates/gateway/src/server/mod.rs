//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Translate the three caller boundaries (registry pre-check, messaging
//!   send, credential configuration) into JSON endpoints.
//! - Map library errors onto [`common::ServiceError`] and HTTP statuses.
//! - Inject shared application state (`AppState`) into handlers.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
