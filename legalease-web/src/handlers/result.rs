use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use legalease_core::models::{Document, RiskSummary};
use serde::Deserialize;

use crate::models::{Layout, RequestContext, ResultTab};
use crate::services::flash::Flash;
use crate::AppState;

#[derive(Deserialize, Default)]
pub struct ResultQuery {
    pub tab: Option<String>,
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub layout: Layout,
    pub document: Document,
    pub risk: RiskSummary,
    pub tab: ResultTab,
}

#[derive(Template)]
#[template(path = "document_missing.html")]
pub struct DocumentMissingTemplate {
    pub layout: Layout,
    pub message: String,
}

pub async fn result_page(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Query(query): Query<ResultQuery>,
) -> Response {
    match ctx.document_gateway(&state).get(&id).await {
        Ok(document) => ResultTemplate {
            layout: ctx.layout().await,
            risk: document.risk_summary(),
            tab: ResultTab::from_query(query.tab.as_deref()),
            document,
        }
        .into_response(),
        Err(err) if err.is_auth() => ctx.expire().await,
        Err(err) if err.is_not_found() => {
            let template = DocumentMissingTemplate {
                layout: ctx.layout().await,
                message: err.user_message().to_string(),
            };
            (StatusCode::NOT_FOUND, template).into_response()
        }
        Err(err) => {
            tracing::error!(document_id = %id, error = %err, "Failed to load document");
            ctx.flash(Flash::error(err.user_message())).await;
            Redirect::to("/history").into_response()
        }
    }
}
