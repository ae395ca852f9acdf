use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use legalease_core::models::User;
use legalease_core::observability::REQUEST_ID_HEADER;
use legalease_core::routing::LOGIN_PATH;
use legalease_core::{ApiClient, AuthGateway, DocumentGateway, SessionStore};
use std::sync::Arc;
use tower_sessions::Session;

use crate::middleware::auth::HX_REDIRECT;
use crate::services::flash::{self, Flash};
use crate::services::session::TowerSessionStorage;
use crate::AppState;

pub type WebSessionStore = SessionStore<TowerSessionStorage>;

/// Per-request view of the signed-in user plus the means to talk to the
/// backend on their behalf.
pub struct RequestContext {
    pub session: Session,
    pub store: Arc<WebSessionStore>,
    request_id: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let store = Arc::new(SessionStore::new(TowerSessionStorage::new(session.clone())));
        store.load().await;

        Ok(Self {
            session,
            store,
            request_id,
        })
    }
}

impl RequestContext {
    pub fn user(&self) -> Option<User> {
        self.store.user()
    }

    pub fn api_client(&self, state: &AppState) -> ApiClient {
        let client = ApiClient::new(
            state.http.clone(),
            state.settings.backend.url.clone(),
            self.store.clone(),
        );
        match &self.request_id {
            Some(id) => client.with_request_id(id.clone()),
            None => client,
        }
    }

    pub fn auth_gateway(&self, state: &AppState) -> AuthGateway {
        AuthGateway::new(self.api_client(state))
    }

    pub fn document_gateway(&self, state: &AppState) -> DocumentGateway {
        DocumentGateway::new(self.api_client(state))
    }

    pub async fn flash(&self, flash: Flash) {
        flash::push(&self.session, flash).await;
    }

    /// Page chrome for a full render; drains pending toasts.
    pub async fn layout(&self) -> Layout {
        Layout {
            user: self.user(),
            flashes: flash::take(&self.session).await,
        }
    }

    /// The backend no longer accepts our token: sign out and go to login.
    pub async fn expire(&self) -> Response {
        self.end_expired_session().await;
        Redirect::to(LOGIN_PATH).into_response()
    }

    /// [`expire`](Self::expire) for htmx requests, which need the redirect
    /// as a header to leave the page.
    pub async fn expire_htmx(&self) -> Response {
        self.end_expired_session().await;
        (StatusCode::OK, [(HX_REDIRECT, LOGIN_PATH)]).into_response()
    }

    async fn end_expired_session(&self) {
        tracing::info!("Backend rejected the session token");
        if let Err(e) = self.store.logout().await {
            tracing::warn!(error = %e, "Failed to clear expired session");
        }
        self.flash(Flash::error("Your session has expired. Please log in again."))
            .await;
    }
}

/// Data the base template needs on every page.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub user: Option<User>,
    pub flashes: Vec<Flash>,
}

impl Layout {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_name(&self) -> &str {
        self.user.as_ref().map(User::display_name).unwrap_or("")
    }

    pub fn user_initials(&self) -> String {
        self.user.as_ref().map(User::initials).unwrap_or_default()
    }
}
