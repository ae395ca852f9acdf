use secrecy::Secret;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

const LOGIN_REQUIRED: &str = "Please enter your email and password.";
const REGISTER_REQUIRED: &str = "Please fill in all fields.";

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "login_field"))]
    pub email: String,
    #[validate(custom(function = "login_field"))]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

impl LoginForm {
    pub fn into_credentials(self) -> (String, Secret<String>) {
        (self.email.trim().to_string(), Secret::new(self.password))
    }
}

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(custom(function = "register_field"))]
    pub name: String,
    #[validate(custom(function = "register_field"))]
    pub email: String,
    #[validate(
        custom(function = "register_field"),
        length(min = 6, message = "Password must be at least 6 characters.")
    )]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

impl RegisterForm {
    pub fn into_fields(self) -> (String, String, Secret<String>) {
        (
            self.name.trim().to_string(),
            self.email.trim().to_string(),
            Secret::new(self.password),
        )
    }
}

#[derive(Deserialize, Default)]
pub struct NextParam {
    pub next: Option<String>,
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(message.into());
        return Err(err);
    }
    Ok(())
}

fn login_field(value: &str) -> Result<(), ValidationError> {
    required(value, LOGIN_REQUIRED)
}

fn register_field(value: &str) -> Result<(), ValidationError> {
    required(value, REGISTER_REQUIRED)
}

/// First message in form-field order, for a single toast.
pub fn first_message(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();
    field_order
        .iter()
        .filter_map(|field| field_errors.get(field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Please check the form and try again.".to_string())
}
