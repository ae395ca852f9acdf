use askama::Template;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use legalease_core::models::User;
use legalease_core::upload::{
    file_too_large, UploadFile, UploadJob, UploadOutcome, IN_PROGRESS_LABEL,
};
use legalease_core::ClientError;

use crate::models::{Layout, RequestContext};
use crate::services::flash::Flash;
use crate::AppState;

const UPLOAD_PAGE: &str = "/upload";
const FILE_FIELD: &str = "file";

#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    pub layout: Layout,
    pub greeting: String,
    pub in_progress_label: &'static str,
    pub max_megabytes: usize,
}

pub async fn upload_page(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let user = match ctx.auth_gateway(&state).current_user().await {
        Ok(user) => Some(user),
        Err(err) if err.is_auth() => return ctx.expire().await,
        Err(err) => {
            tracing::warn!(error = %err, "Profile lookup failed, greeting with stored user");
            ctx.user()
        }
    };

    UploadTemplate {
        layout: ctx.layout().await,
        greeting: user
            .as_ref()
            .map(User::display_name)
            .unwrap_or("there")
            .to_string(),
        in_progress_label: IN_PROGRESS_LABEL,
        max_megabytes: state.settings.upload.max_bytes / (1024 * 1024),
    }
    .into_response()
}

pub async fn upload_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    mut multipart: Multipart,
) -> Response {
    let max_bytes = state.settings.upload.max_bytes;
    let file = match read_file(&mut multipart, max_bytes).await {
        Ok(file) => file,
        Err(err) => return retry(&ctx, err.user_message()).await,
    };

    let mut job = UploadJob::new(max_bytes);
    if let Err(err) = job.begin(&file) {
        tracing::info!(file_name = %file.file_name, error = %err, "Upload rejected locally");
        return retry(&ctx, err.user_message()).await;
    }

    let file_name = file.file_name.clone();
    let result = ctx.document_gateway(&state).upload(file).await;
    if matches!(&result, Err(err) if err.is_auth()) {
        return ctx.expire().await;
    }

    match job.complete(result) {
        UploadOutcome::Navigate(target) => {
            ctx.flash(Flash::success(format!("{} analyzed successfully.", file_name)))
                .await;
            Redirect::to(&target).into_response()
        }
        UploadOutcome::Retry { message } => {
            tracing::warn!(file_name = %file_name, error = %message, "Upload failed");
            retry(&ctx, &message).await
        }
    }
}

async fn retry(ctx: &RequestContext, message: &str) -> Response {
    ctx.flash(Flash::error(message)).await;
    Redirect::to(UPLOAD_PAGE).into_response()
}

/// Pull the single `file` field out of the form.
async fn read_file(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<UploadFile, ClientError> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if file.is_some() {
            return Err(ClientError::Validation(
                "Please upload one file at a time.".to_string(),
            ));
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_bytes))?;
        file = Some(UploadFile::new(file_name, content_type, bytes.to_vec()));
    }

    file.ok_or_else(|| ClientError::Validation("Please choose a PDF to upload.".to_string()))
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> ClientError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return file_too_large(max_bytes);
    }
    tracing::warn!(error = %err, "Malformed upload form");
    ClientError::Validation("The upload could not be read. Please try again.".to_string())
}
