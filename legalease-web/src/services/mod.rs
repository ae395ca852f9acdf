pub mod flash;
pub mod metrics;
pub mod session;
