use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
    Router,
};
use legalease_core::observability::REQUEST_ID_HEADER;
use time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers::{
    app::{health_check, index, not_found},
    auth::{login_handler, login_page, logout_handler, register_handler, register_page},
    history::{delete_document, history_page},
    metrics::metrics,
    result::result_page,
    upload::{upload_handler, upload_page},
};
use crate::middleware::{
    auth::route_guard, metrics::metrics_middleware, request_id::request_id_middleware,
    security_headers::security_headers_middleware,
};
use crate::AppState;

/// Room for the multipart envelope around a maximum-size file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.settings.session.secure_cookie)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            state.settings.session.inactivity_hours,
        )));

    let upload_limit = state.settings.upload.max_bytes + MULTIPART_OVERHEAD_BYTES;

    let protected = Router::new()
        .route(
            "/upload",
            get(upload_page)
                .post(upload_handler)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/result/:id", get(result_page))
        .route("/history", get(history_page))
        .route("/history/:id", delete(delete_document))
        .route_layer(from_fn_with_state(state.clone(), route_guard));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/login", get(login_page).post(login_handler))
        .route("/register", get(register_page).post(register_handler))
        .route("/logout", post(logout_handler))
        .merge(protected)
        .nest_service("/static", ServeDir::new(static_dir()))
        .fallback(not_found)
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Static assets live next to the crate manifest; resolve them whether the
/// binary runs from the workspace root or the crate directory.
fn static_dir() -> std::path::PathBuf {
    let crate_relative = std::path::Path::new("legalease-web").join("static");
    if crate_relative.is_dir() {
        crate_relative
    } else {
        std::path::PathBuf::from("static")
    }
}
