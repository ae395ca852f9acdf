pub mod app;
pub mod auth;
pub mod history;
pub mod metrics;
pub mod result;
pub mod upload;
