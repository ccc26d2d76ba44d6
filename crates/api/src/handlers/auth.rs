//! Handlers for admin sign-in, sign-out and password change.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use portfolio_core::error::CoreError;
use portfolio_core::render::pages::{render_login_page, Notice, NoticeKind};
use serde::Deserialize;

use crate::auth::cookie::{clear_cookie, session_cookie, session_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AdminSession, LOGIN_PATH};
use crate::response::StatusResponse;
use crate::state::AppState;

/// Where a successful sign-in lands.
pub const ADMIN_HOME: &str = "/admin";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Form body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /admin/api/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /admin/login
///
/// Show the login page, or go straight to the panel when already signed in.
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = session_token(&headers);
    match state.guard.is_authenticated(token.as_deref()).await {
        Ok(true) => Redirect::to(ADMIN_HOME).into_response(),
        Ok(false) => Html(render_login_page(None)).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Session check failed on login page");
            Html(render_login_page(None)).into_response()
        }
    }
}

/// POST /admin/login
///
/// Check the password. On success set the session cookie and redirect to the
/// panel; otherwise re-render the login page with the reason.
pub async fn login(State(state): State<AppState>, Form(input): Form<LoginForm>) -> Response {
    match state.guard.login(&input.password).await {
        Ok(token) => {
            let cookie = session_cookie(&token, state.config.secure_cookies);
            ([(SET_COOKIE, cookie)], Redirect::to(ADMIN_HOME)).into_response()
        }
        Err(CoreError::TooManyAttempts(msg)) => login_rejected(StatusCode::TOO_MANY_REQUESTS, msg),
        Err(CoreError::Unauthorized(msg)) => login_rejected(StatusCode::UNAUTHORIZED, msg),
        Err(other) => AppError::Core(other).into_response(),
    }
}

fn login_rejected(status: StatusCode, message: String) -> Response {
    let notice = Notice::new(NoticeKind::Danger, message);
    (status, Html(render_login_page(Some(&notice)))).into_response()
}

/// POST /admin/logout
///
/// Always clears the cookie and the stored session, then redirects to login.
pub async fn logout(State(state): State<AppState>) -> Response {
    if let Err(err) = state.guard.logout().await {
        tracing::warn!(error = %err, "Failed to remove admin session record");
    }
    let cookie = clear_cookie(state.config.secure_cookies);
    ([(SET_COOKIE, cookie)], Redirect::to(LOGIN_PATH)).into_response()
}

/// POST /admin/api/password
pub async fn change_password(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<StatusResponse>> {
    state
        .guard
        .change_password(
            &input.current_password,
            &input.new_password,
            &input.confirm_password,
        )
        .await?;
    Ok(Json(
        StatusResponse::success().with_message("Password changed"),
    ))
}
