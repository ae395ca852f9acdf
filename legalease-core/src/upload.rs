//! One upload from file pick to result page.

use crate::error::ClientError;
use crate::gateway::DocumentGateway;
use crate::models::Document;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const ACCEPTED_CONTENT_TYPE: &str = "application/pdf";

/// Shown for the whole time the backend is working. The backend reports no
/// progress, so there is only one label.
pub const IN_PROGRESS_LABEL: &str = "Analyzing your document… This may take up to a minute.";

#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Local checks that spare a round trip.
    pub fn validate(&self, max_bytes: usize) -> Result<(), ClientError> {
        if self.bytes.is_empty() {
            return Err(ClientError::Validation(
                "Please choose a PDF to upload.".to_string(),
            ));
        }
        if !is_pdf(&self.content_type, &self.file_name) {
            return Err(ClientError::Validation(
                "Only PDF files are accepted.".to_string(),
            ));
        }
        if self.bytes.len() > max_bytes {
            return Err(file_too_large(max_bytes));
        }
        Ok(())
    }
}

pub fn file_too_large(max_bytes: usize) -> ClientError {
    ClientError::Validation(format!(
        "File is too large. Maximum size is {}.",
        human_size(max_bytes)
    ))
}

fn is_pdf(content_type: &str, file_name: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        ACCEPTED_CONTENT_TYPE => true,
        "" | "application/octet-stream" => file_name.to_ascii_lowercase().ends_with(".pdf"),
        _ => false,
    }
}

fn human_size(bytes: usize) -> String {
    const MB: usize = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else {
        format!("{} bytes", bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Uploading { file_name: String },
    Succeeded { document_id: String },
    Failed { message: String },
}

/// What the view does once the upload settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Go to the result page.
    Navigate(String),
    /// Stay on the upload page, show the message, allow another try.
    Retry { message: String },
}

#[derive(Debug)]
pub struct UploadJob {
    state: UploadState,
    max_bytes: usize,
}

impl Default for UploadJob {
    fn default() -> Self {
        Self::new(MAX_UPLOAD_BYTES)
    }
}

impl UploadJob {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            state: UploadState::Idle,
            max_bytes,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self.state, UploadState::Uploading { .. })
    }

    /// `Idle → Uploading`. Rejects a second start while one is running and
    /// files that fail local checks.
    pub fn begin(&mut self, file: &UploadFile) -> Result<(), ClientError> {
        if self.is_in_progress() {
            return Err(ClientError::Validation(
                "An upload is already in progress.".to_string(),
            ));
        }
        if let Err(err) = file.validate(self.max_bytes) {
            self.state = UploadState::Failed {
                message: err.user_message().to_string(),
            };
            return Err(err);
        }
        self.state = UploadState::Uploading {
            file_name: file.file_name.clone(),
        };
        Ok(())
    }

    /// `Uploading → Succeeded | Failed`.
    pub fn complete(&mut self, result: Result<Document, ClientError>) -> UploadOutcome {
        match result {
            Ok(document) => {
                let target = document.result_path();
                self.state = UploadState::Succeeded {
                    document_id: document.id,
                };
                UploadOutcome::Navigate(target)
            }
            Err(err) => {
                let message = err.user_message().to_string();
                self.state = UploadState::Failed {
                    message: message.clone(),
                };
                UploadOutcome::Retry { message }
            }
        }
    }

    /// `Failed → Idle`.
    pub fn reset(&mut self) {
        if !self.is_in_progress() {
            self.state = UploadState::Idle;
        }
    }

    /// Run the whole flow against the backend.
    pub async fn submit(&mut self, gateway: &DocumentGateway, file: UploadFile) -> UploadOutcome {
        if let Err(err) = self.begin(&file) {
            return UploadOutcome::Retry {
                message: err.user_message().to_string(),
            };
        }
        let result = gateway.upload(file).await;
        self.complete(result)
    }
}
