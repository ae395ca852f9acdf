use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced to the view layer.
///
/// Every variant carries a message that is safe to show to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Required fields missing or rejected, locally or by the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No response from the backend.
    #[error("Network error: {0}")]
    Network(String),

    /// Credentials rejected or the bearer token is missing/invalid.
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend refused the file or failed to analyze it.
    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },

    /// Session persistence failed.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// The message to show in a toast.
    pub fn user_message(&self) -> &str {
        match self {
            ClientError::Validation(msg)
            | ClientError::Network(msg)
            | ClientError::Auth(msg)
            | ClientError::NotFound(msg)
            | ClientError::Upload(msg)
            | ClientError::Storage(msg)
            | ClientError::Decode(msg) => msg,
            ClientError::Unexpected { message, .. } => message,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Backend operations, used to pick the error variant and fallback text for
/// a failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    CurrentUser,
    Upload,
    History,
    GetDocument,
    DeleteDocument,
}

impl Operation {
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Register => "Registration failed. Please try again.",
            Operation::Login => "Login failed. Please check your credentials.",
            Operation::CurrentUser => "Your session has expired. Please log in again.",
            Operation::Upload => "Upload failed. Please try again.",
            Operation::History => "Could not load your documents.",
            Operation::GetDocument => "Could not load document. Please try again.",
            Operation::DeleteDocument => "Could not delete document.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Register => "register",
            Operation::Login => "login",
            Operation::CurrentUser => "current_user",
            Operation::Upload => "upload",
            Operation::History => "history",
            Operation::GetDocument => "get_document",
            Operation::DeleteDocument => "delete_document",
        }
    }
}

/// Map a non-success backend response onto the error taxonomy.
pub fn classify(operation: Operation, status: StatusCode, body: &str) -> ClientError {
    let message = backend_message(body).unwrap_or_else(|| operation.fallback_message().to_string());

    match (operation, status.as_u16()) {
        (_, 401 | 403) => ClientError::Auth(message),
        (Operation::CurrentUser, 404) => ClientError::Auth(message),
        (Operation::Register | Operation::Login, 400 | 422) => ClientError::Validation(message),
        (Operation::Upload, _) => ClientError::Upload(message),
        (Operation::GetDocument | Operation::DeleteDocument, 400 | 404) => {
            ClientError::NotFound(message)
        }
        (_, code) => ClientError::Unexpected {
            status: code,
            message,
        },
    }
}

/// Extract the human-readable message from an error body.
///
/// Understands `{"detail": "..."}`, `{"detail": [{"msg": "..."}]}`,
/// `{"message": "..."}` and `{"error": "..."}`.
pub fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(detail) = value.get("detail") {
        if let Some(text) = detail.as_str() {
            return non_empty(text);
        }
        if let Some(items) = detail.as_array() {
            let joined = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join("; ");
            return non_empty(&joined);
        }
    }

    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .and_then(non_empty)
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
