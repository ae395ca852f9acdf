use reqwest::multipart::{Form, Part};

use crate::error::{ClientError, Operation};
use crate::http::ApiClient;
use crate::models::document::HistoryResponse;
use crate::models::{DeleteConfirmation, Document};
use crate::upload::UploadFile;

pub const UPLOAD_PATH: &str = "/api/document/upload";
pub const HISTORY_PATH: &str = "/api/document/history";

/// Backend path for one document. The id always stays a single path
/// segment; ids that could only name the parent or the collection are
/// rejected before any request.
pub fn document_path(id: &str) -> Result<String, ClientError> {
    if matches!(id, "" | "." | "..") {
        return Err(ClientError::NotFound("Document not found.".to_string()));
    }
    Ok(format!("/api/document/{}", urlencoding::encode(id)))
}

/// Document operations. Ownership checks happen on the backend.
pub struct DocumentGateway {
    client: ApiClient,
}

impl DocumentGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Send one file for extraction and analysis; resolves once the backend
    /// has finished.
    pub async fn upload(&self, file: UploadFile) -> Result<Document, ClientError> {
        let file_name = file.file_name.clone();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|_| ClientError::Validation("Only PDF files are accepted.".to_string()))?;
        let form = Form::new().part("file", part);

        let document: Document = self
            .client
            .send_json(Operation::Upload, self.client.post(UPLOAD_PATH).multipart(form))
            .await?;

        tracing::info!(document_id = %document.id, file_name = %file_name, "Document analyzed");
        Ok(document)
    }

    /// The user's documents in backend order (newest first).
    pub async fn list(&self) -> Result<Vec<Document>, ClientError> {
        let response: HistoryResponse = self
            .client
            .send_json(Operation::History, self.client.get(HISTORY_PATH))
            .await?;
        Ok(response.documents)
    }

    pub async fn get(&self, id: &str) -> Result<Document, ClientError> {
        let path = document_path(id)?;
        self.client
            .send_json(Operation::GetDocument, self.client.get(&path))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteConfirmation, ClientError> {
        let path = document_path(id)?;
        let confirmation: DeleteConfirmation = self
            .client
            .send_json(Operation::DeleteDocument, self.client.delete(&path))
            .await?;

        tracing::info!(document_id = %id, "Document deleted");
        Ok(confirmation)
    }
}
