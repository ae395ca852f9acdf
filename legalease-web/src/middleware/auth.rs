use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use legalease_core::routing::GuardDecision;
use legalease_core::SessionStore;
use tower_sessions::Session;

use crate::services::session::TowerSessionStorage;
use crate::AppState;

pub const HX_REQUEST: &str = "hx-request";
pub const HX_REDIRECT: &str = "hx-redirect";

/// Runs before every protected handler; anonymous requests go to login.
pub async fn route_guard(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let store = SessionStore::new(TowerSessionStorage::new(session));
    let current = store.load().await;

    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    match state.guard.check(&path_and_query, &current) {
        GuardDecision::Render => next.run(request).await,
        GuardDecision::Redirect(target) => {
            tracing::info!(path = %path_and_query, "Unauthenticated request redirected to login");
            redirect(&request, &target)
        }
    }
}

/// Full-page redirect that also works for htmx requests, which would
/// otherwise swap the login page into the target element.
pub fn redirect(request: &Request, target: &str) -> Response {
    if request.headers().contains_key(HX_REQUEST) {
        if let Ok(value) = HeaderValue::from_str(target) {
            return (StatusCode::OK, [(HX_REDIRECT, value)]).into_response();
        }
    }
    Redirect::to(target).into_response()
}
