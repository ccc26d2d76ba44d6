use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Admin sign-in routes.
///
/// ```text
/// GET  /admin/login          login_page
/// POST /admin/login          login
/// POST /admin/logout         logout
/// POST /admin/api/password   change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(auth::login_page).post(auth::login))
        .route("/admin/logout", post(auth::logout))
        .route("/admin/api/password", post(auth::change_password))
}
