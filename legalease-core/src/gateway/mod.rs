//! Typed request/response pairs for the backend REST API.

pub mod auth;
pub mod document;

pub use auth::AuthGateway;
pub use document::DocumentGateway;
