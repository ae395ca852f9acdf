use askama::Template;
use axum::{http::StatusCode, response::IntoResponse};

use crate::models::{Layout, RequestContext};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

pub async fn index(ctx: RequestContext) -> impl IntoResponse {
    IndexTemplate {
        layout: ctx.layout().await,
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn not_found(ctx: RequestContext) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            layout: ctx.layout().await,
        },
    )
}
