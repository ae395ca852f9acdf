use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use legalease_core::models::DocumentList;

use crate::models::{Layout, RequestContext};
use crate::services::flash::Flash;
use crate::AppState;

#[derive(Template)]
#[template(path = "history.html")]
pub struct HistoryTemplate {
    pub layout: Layout,
    pub documents: DocumentList,
    pub load_error: String,
}

impl HistoryTemplate {
    pub fn failed_to_load(&self) -> bool {
        !self.load_error.is_empty()
    }
}

/// Out-of-band toast returned to htmx in place of a swapped fragment.
#[derive(Template)]
#[template(path = "partials/toast_oob.html")]
pub struct ToastFragment {
    pub flash: Flash,
}

pub async fn history_page(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let (documents, load_error) = match ctx.document_gateway(&state).list().await {
        Ok(documents) => (DocumentList::new(documents), String::new()),
        Err(err) if err.is_auth() => return ctx.expire().await,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load history");
            (DocumentList::default(), err.user_message().to_string())
        }
    };

    HistoryTemplate {
        layout: ctx.layout().await,
        documents,
        load_error,
    }
    .into_response()
}

/// htmx delete: an empty main fragment removes the row in place, so the
/// history is not fetched again.
pub async fn delete_document(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Response {
    match ctx.document_gateway(&state).delete(&id).await {
        Ok(confirmation) => {
            let message = if confirmation.message.trim().is_empty() {
                "Document deleted.".to_string()
            } else {
                confirmation.message
            };
            ToastFragment {
                flash: Flash::success(message),
            }
            .into_response()
        }
        Err(err) if err.is_auth() => ctx.expire_htmx().await,
        Err(err) => {
            tracing::warn!(document_id = %id, error = %err, "Delete failed");
            (
                [("hx-reswap", "none")],
                ToastFragment {
                    flash: Flash::error(err.user_message()),
                },
            )
                .into_response()
        }
    }
}
