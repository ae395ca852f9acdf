pub mod auth;
pub mod metrics;
pub mod request_id;
pub mod security_headers;
