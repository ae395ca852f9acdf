use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// Name to greet the user with; falls back to the mailbox part of the email.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if !name.is_empty() {
            return name;
        }
        self.email.split('@').next().unwrap_or("there")
    }

    pub fn initials(&self) -> String {
        let initials: String = self
            .display_name()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase();

        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}

/// Body returned by register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// `/api/auth/me` returns either the bare user or `{ "user": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CurrentUserResponse {
    Wrapped { user: User },
    Bare(User),
}

impl CurrentUserResponse {
    pub(crate) fn into_user(self) -> User {
        match self {
            CurrentUserResponse::Wrapped { user } | CurrentUserResponse::Bare(user) => user,
        }
    }
}
