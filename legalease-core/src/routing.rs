//! Route table and the guard that keeps signed-out users off protected views.

use serde::Deserialize;

use crate::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_POST_LOGIN_PATH: &str = "/upload";
pub const HISTORY_PATH: &str = "/history";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Upload,
    Result(String),
    History,
    /// A single entry of the history list (delete target).
    HistoryEntry(String),
    NotFound,
}

impl Route {
    /// Resolve a request path (query string ignored).
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match trimmed {
            "/" | "" => Route::Landing,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/upload" => Route::Upload,
            HISTORY_PATH => Route::History,
            other => {
                if let Some(id) = single_segment(other, "/result/") {
                    Route::Result(id)
                } else if let Some(id) = single_segment(other, "/history/") {
                    Route::HistoryEntry(id)
                } else {
                    Route::NotFound
                }
            }
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Upload | Route::Result(_) | Route::History | Route::HistoryEntry(_)
        )
    }

    /// Protected routes a browser can navigate to. History entries only
    /// answer DELETE, so they never qualify as a place to return to.
    pub fn is_protected_page(&self) -> bool {
        self.is_protected() && !matches!(self, Route::HistoryEntry(_))
    }
}

fn single_segment(path: &str, prefix: &str) -> Option<String> {
    path.strip_prefix(prefix)
        .filter(|rest| !rest.is_empty() && !rest.contains('/'))
        .map(str::to_string)
}

/// Where a user lands after signing in when they were bounced off a
/// protected page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnPolicy {
    /// Always land on the configured default page.
    #[default]
    FixedDefault,
    /// Carry the requested page through login as `?next=` and return to it.
    PreserveDeepLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    policy: ReturnPolicy,
    post_login_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(ReturnPolicy::default(), DEFAULT_POST_LOGIN_PATH)
    }
}

impl RouteGuard {
    pub fn new(policy: ReturnPolicy, post_login_path: impl Into<String>) -> Self {
        Self {
            policy,
            post_login_path: post_login_path.into(),
        }
    }

    /// Decide before rendering `path_and_query`.
    pub fn check(&self, path_and_query: &str, session: &Session) -> GuardDecision {
        let route = Route::parse(path_and_query);
        if !route.is_protected() || session.is_authenticated() {
            return GuardDecision::Render;
        }
        GuardDecision::Redirect(self.login_redirect(path_and_query))
    }

    pub fn login_redirect(&self, requested: &str) -> String {
        // A bounced delete returns to the list it was issued from.
        let requested = match Route::parse(requested) {
            Route::HistoryEntry(_) => HISTORY_PATH,
            _ => requested,
        };
        match self.policy {
            ReturnPolicy::FixedDefault => LOGIN_PATH.to_string(),
            ReturnPolicy::PreserveDeepLink => serde_urlencoded::to_string([("next", requested)])
                .map(|query| format!("{}?{}", LOGIN_PATH, query))
                .unwrap_or_else(|_| LOGIN_PATH.to_string()),
        }
    }

    /// Page to show after a successful login or registration.
    ///
    /// `next` is only honoured under [`ReturnPolicy::PreserveDeepLink`] and
    /// only when it names a protected page on this site.
    pub fn post_login_target(&self, next: Option<&str>) -> String {
        let honoured = match (self.policy, next) {
            (ReturnPolicy::PreserveDeepLink, Some(next)) if is_internal_protected(next) => {
                Some(next.to_string())
            }
            _ => None,
        };
        honoured.unwrap_or_else(|| self.post_login_path.clone())
    }
}

fn is_internal_protected(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && Route::parse(target).is_protected_page()
}
