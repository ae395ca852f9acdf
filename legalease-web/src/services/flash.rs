//! One-shot toast messages carried across a redirect.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const FLASH_KEY: &str = "legalease.flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "toast toast-success",
            FlashKind::Error => "toast toast-error",
            FlashKind::Info => "toast toast-info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "✅",
            FlashKind::Error => "⚠️",
            FlashKind::Info => "ℹ️",
        }
    }
}

/// Queue a toast for the next rendered page. Failures are logged, not raised.
pub async fn push(session: &Session, flash: Flash) {
    let mut pending: Vec<Flash> = session
        .get(FLASH_KEY)
        .await
        .unwrap_or_default()
        .unwrap_or_default();
    pending.push(flash);

    if let Err(e) = session.insert(FLASH_KEY, pending).await {
        tracing::warn!(error = %e, "Failed to queue flash message");
    }
}

/// Drain queued toasts.
pub async fn take(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(FLASH_KEY).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash messages");
            Vec::new()
        }
    }
}
