//! Shared setup for gateway tests against a mocked backend.

#![allow(dead_code)]

use legalease_core::models::User;
use legalease_core::{ApiClient, MemoryStorage, SessionStore};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

pub fn ada() -> User {
    User {
        id: "u_1".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    }
}

pub fn user_json() -> Value {
    json!({ "id": "u_1", "name": "Ada", "email": "ada@example.com" })
}

pub fn document_json(id: &str) -> Value {
    json!({
        "id": id,
        "fileName": "lease.pdf",
        "fileUrl": "",
        "documentType": "rental",
        "summary": "Twelve month residential lease.",
        "riskClauses": [
            { "clause": "Tenant bears all repairs", "explanation": "Shifts landlord duties", "severity": "high" }
        ],
        "keyTerms": [ { "term": "Monthly rent", "value": "₹25,000" } ],
        "createdAt": "2026-03-05T10:15:30.123456"
    })
}

pub struct TestBackend {
    pub server: MockServer,
    pub store: Arc<SessionStore<MemoryStorage>>,
    pub storage: MemoryStorage,
}

impl TestBackend {
    pub async fn start() -> Self {
        let storage = MemoryStorage::new();
        Self {
            server: MockServer::start().await,
            store: Arc::new(SessionStore::new(storage.clone())),
            storage,
        }
    }

    pub async fn signed_in(token: &str) -> Self {
        let backend = Self::start().await;
        backend
            .store
            .login(ada(), token.to_string())
            .await
            .expect("login into memory storage");
        backend
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(reqwest::Client::new(), self.server.uri(), self.store.clone())
    }
}
