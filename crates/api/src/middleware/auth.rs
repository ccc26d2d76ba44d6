//! Cookie-based admin session extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use portfolio_core::error::CoreError;

use crate::auth::cookie::session_token;
use crate::error::AppError;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/admin/login";

/// Proof of a valid admin session for JSON endpoints.
///
/// ```ignore
/// async fn my_handler(_admin: AdminSession) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers);
        if state.guard.is_authenticated(token.as_deref()).await? {
            Ok(AdminSession)
        } else {
            Err(AppError::Core(CoreError::Unauthorized(
                "Admin session required".into(),
            )))
        }
    }
}

/// Proof of a valid admin session for HTML pages. Anything else is sent to
/// the login page.
#[derive(Debug, Clone, Copy)]
pub struct AdminPage;

impl FromRequestParts<AppState> for AdminPage {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers);
        match state.guard.is_authenticated(token.as_deref()).await {
            Ok(true) => Ok(AdminPage),
            Ok(false) => Err(Redirect::to(LOGIN_PATH)),
            Err(err) => {
                tracing::warn!(error = %err, "Session check failed, redirecting to login");
                Err(Redirect::to(LOGIN_PATH))
            }
        }
    }
}
