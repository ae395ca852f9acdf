pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use config::Settings;
use legalease_core::routing::RouteGuard;
use std::sync::Arc;

/// Shared application state: settings, the pooled backend client and the
/// route guard built from the navigation settings.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub http: reqwest::Client,
    pub guard: Arc<RouteGuard>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let guard = RouteGuard::new(
            settings.navigation.return_policy,
            settings.navigation.post_login_path.clone(),
        );
        Self {
            settings: Arc::new(settings),
            http: reqwest::Client::new(),
            guard: Arc::new(guard),
        }
    }
}
