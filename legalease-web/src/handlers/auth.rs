use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use legalease_core::models::AuthResponse;
use validator::Validate;

use crate::models::forms::first_message;
use crate::models::{Layout, LoginForm, NextParam, RegisterForm, RequestContext};
use crate::services::flash::Flash;
use crate::AppState;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub email: String,
    pub next: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub name: String,
    pub email: String,
    pub next: String,
}

pub async fn login_page(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<NextParam>,
) -> Response {
    if ctx.store.is_authenticated() {
        return Redirect::to(&state.guard.post_login_target(params.next.as_deref()))
            .into_response();
    }
    LoginTemplate {
        layout: ctx.layout().await,
        email: String::new(),
        next: params.next.unwrap_or_default(),
    }
    .into_response()
}

pub async fn register_page(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<NextParam>,
) -> Response {
    if ctx.store.is_authenticated() {
        return Redirect::to(&state.guard.post_login_target(params.next.as_deref()))
            .into_response();
    }
    RegisterTemplate {
        layout: ctx.layout().await,
        name: String::new(),
        email: String::new(),
        next: params.next.unwrap_or_default(),
    }
    .into_response()
}

pub async fn login_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<LoginForm>,
) -> Response {
    let next = form.next.clone();
    if let Err(errors) = form.validate() {
        let message = first_message(&errors, &["email", "password"]);
        return login_failed(&ctx, form.email, next, message).await;
    }

    let (email, password) = form.into_credentials();
    match ctx.auth_gateway(&state).login(&email, &password).await {
        Ok(auth) => {
            let greeting = format!("Welcome back, {}!", auth.user.display_name());
            sign_in(&state, &ctx, auth, greeting, next.as_deref()).await
        }
        Err(err) => {
            tracing::warn!(error = %err, "Login rejected");
            login_failed(&ctx, email, next, err.user_message().to_string()).await
        }
    }
}

pub async fn register_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Form(form): Form<RegisterForm>,
) -> Response {
    let next = form.next.clone();
    if let Err(errors) = form.validate() {
        let message = first_message(&errors, &["name", "email", "password"]);
        return register_failed(&ctx, form.name, form.email, next, message).await;
    }

    let (name, email, password) = form.into_fields();
    match ctx
        .auth_gateway(&state)
        .register(&name, &email, &password)
        .await
    {
        Ok(auth) => {
            let greeting = format!("Welcome to LegalEase, {}!", auth.user.display_name());
            sign_in(&state, &ctx, auth, greeting, next.as_deref()).await
        }
        Err(err) => {
            tracing::warn!(error = %err, "Registration rejected");
            register_failed(&ctx, name, email, next, err.user_message().to_string()).await
        }
    }
}

pub async fn logout_handler(ctx: RequestContext) -> Response {
    let user_id = ctx.user().map(|user| user.id);
    if let Err(e) = ctx.store.logout().await {
        tracing::warn!(error = %e, "Failed to clear session storage on logout");
    }
    tracing::info!(user_id = ?user_id, "User logged out");
    ctx.flash(Flash::info("You have been logged out.")).await;
    Redirect::to("/").into_response()
}

async fn sign_in(
    state: &AppState,
    ctx: &RequestContext,
    auth: AuthResponse,
    greeting: String,
    next: Option<&str>,
) -> Response {
    // New identity, new session id.
    if let Err(e) = ctx.session.cycle_id().await {
        tracing::warn!(error = %e, "Failed to rotate session id");
    }

    let user_id = auth.user.id.clone();
    if let Err(err) = ctx.store.login(auth.user, auth.token).await {
        tracing::error!(error = %err, user_id = %user_id, "Failed to persist session");
        ctx.flash(Flash::error(err.user_message())).await;
        return Redirect::to(legalease_core::routing::LOGIN_PATH).into_response();
    }

    tracing::info!(user_id = %user_id, "User signed in");
    ctx.flash(Flash::success(greeting)).await;
    Redirect::to(&state.guard.post_login_target(next)).into_response()
}

async fn with_error(ctx: &RequestContext, message: String) -> Layout {
    let mut layout = ctx.layout().await;
    layout.flashes.push(Flash::error(message));
    layout
}

async fn login_failed(
    ctx: &RequestContext,
    email: String,
    next: Option<String>,
    message: String,
) -> Response {
    let template = LoginTemplate {
        layout: with_error(ctx, message).await,
        email,
        next: next.unwrap_or_default(),
    };
    (StatusCode::UNPROCESSABLE_ENTITY, template).into_response()
}

async fn register_failed(
    ctx: &RequestContext,
    name: String,
    email: String,
    next: Option<String>,
    message: String,
) -> Response {
    let template = RegisterTemplate {
        layout: with_error(ctx, message).await,
        name,
        email,
        next: next.unwrap_or_default(),
    };
    (StatusCode::UNPROCESSABLE_ENTITY, template).into_response()
}
