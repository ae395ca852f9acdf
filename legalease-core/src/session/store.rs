use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::storage::{SessionStorage, StorageError};
use crate::error::ClientError;
use crate::http::TokenSource;
use crate::models::User;

pub const STORAGE_NAMESPACE: &str = "legalease";
pub const TOKEN_KEY: &str = "legalease.token";
pub const USER_KEY: &str = "legalease.user";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Credentials {
    user: User,
    token: String,
}

/// Snapshot of who is signed in. User and token are always present or
/// absent together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            credentials: Some(Credentials { user, token }),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.credentials.as_ref().map(|c| &c.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

/// Read/write contract over the current session.
///
/// One store is built per consumer (a request, a CLI run, a test) and shared
/// by reference with the HTTP client, so the client always sees the latest
/// login or logout.
pub struct SessionStore<S> {
    storage: S,
    state: RwLock<Session>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Create an empty store; call [`load`](Self::load) to pick up persisted state.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: RwLock::new(Session::empty()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted session. Never fails: anything unreadable counts as
    /// signed out.
    pub async fn load(&self) -> Session {
        let session = match self.read_persisted().await {
            Ok(Some(session)) => session,
            Ok(None) => Session::empty(),
            Err(reason) => {
                tracing::warn!(%reason, "Discarding unreadable persisted session");
                self.clear_persisted().await.ok();
                Session::empty()
            }
        };

        *self.write_state() = session.clone();
        session
    }

    async fn read_persisted(&self) -> Result<Option<Session>, String> {
        let token = self
            .storage
            .get_item(TOKEN_KEY)
            .await
            .map_err(|e| e.to_string())?;
        let user = self
            .storage
            .get_item(USER_KEY)
            .await
            .map_err(|e| e.to_string())?;

        match (token, user) {
            (None, None) => Ok(None),
            (Some(token), Some(raw_user)) => {
                if token.trim().is_empty() {
                    return Err("empty token".to_string());
                }
                let user: User = serde_json::from_str(&raw_user)
                    .map_err(|e| format!("corrupt user entry: {}", e))?;
                Ok(Some(Session::authenticated(user, token)))
            }
            _ => Err("token and user entries out of step".to_string()),
        }
    }

    /// Persist and adopt `user`/`token`. On failure nothing is kept.
    pub async fn login(&self, user: User, token: String) -> Result<(), ClientError> {
        if token.trim().is_empty() {
            return Err(ClientError::Validation(
                "Server returned an empty session token.".to_string(),
            ));
        }

        let raw_user = serde_json::to_string(&user)
            .map_err(|e| ClientError::Storage(format!("Could not save session: {}", e)))?;

        let persisted: Result<(), StorageError> = async {
            self.storage.set_item(USER_KEY, raw_user).await?;
            self.storage.set_item(TOKEN_KEY, token.clone()).await
        }
        .await;

        if let Err(e) = persisted {
            tracing::error!(error = %e, "Failed to persist session, rolling back");
            self.clear_persisted().await.ok();
            return Err(ClientError::Storage("Could not save your session.".to_string()));
        }

        tracing::info!(user_id = %user.id, "Session established");
        *self.write_state() = Session::authenticated(user, token);
        Ok(())
    }

    /// Forget the session. In-memory state is cleared even when storage fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let previous = std::mem::take(&mut *self.write_state());
        if let Some(user) = previous.user() {
            tracing::info!(user_id = %user.id, "Session cleared");
        }

        self.clear_persisted().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to remove persisted session");
            ClientError::Storage("Could not fully clear your session.".to_string())
        })
    }

    async fn clear_persisted(&self) -> Result<(), StorageError> {
        let token = self.storage.remove_item(TOKEN_KEY).await;
        let user = self.storage.remove_item(USER_KEY).await;
        token.and(user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.read_state().user().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.read_state().token().map(str::to_string)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }
}

impl<S: SessionStorage> TokenSource for SessionStore<S> {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }
}
