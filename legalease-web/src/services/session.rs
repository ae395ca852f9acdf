//! Persists the core session pair inside the cookie-addressed
//! `tower-sessions` record.

use legalease_core::session::{SessionStorage, StorageError};
use legalease_core::async_trait::async_trait;
use tower_sessions::Session;

#[derive(Clone)]
pub struct TowerSessionStorage {
    session: Session,
}

impl TowerSessionStorage {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SessionStorage for TowerSessionStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.session
            .get::<String>(key)
            .await
            .map_err(|e| StorageError(e.to_string()))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.session
            .insert(key, value)
            .await
            .map_err(|e| StorageError(e.to_string()))
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.session
            .remove_value(key)
            .await
            .map(|_| ())
            .map_err(|e| StorageError(e.to_string()))
    }
}
