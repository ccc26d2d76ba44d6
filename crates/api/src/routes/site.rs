use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{contact, site};
use crate::state::AppState;

/// Public site endpoints.
///
/// ```text
/// GET  /api/site         site_info
/// POST /api/send-form    send_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/site", get(site::site_info))
        .route("/api/send-form", post(contact::send_form))
}
