use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin_panel;
use crate::state::AppState;

/// Server-rendered admin pages. All of them redirect to `/admin/login`
/// without a valid session.
///
/// ```text
/// GET  /admin                          dashboard
/// POST /admin/projects                 create
/// POST /admin/projects/{id}            update
/// GET  /admin/projects/{id}/edit       edit_form
/// GET  /admin/projects/{id}/delete     confirm_delete
/// POST /admin/projects/{id}/delete     delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_panel::dashboard))
        .route("/admin/projects", post(admin_panel::create))
        .route("/admin/projects/{id}", post(admin_panel::update))
        .route("/admin/projects/{id}/edit", get(admin_panel::edit_form))
        .route(
            "/admin/projects/{id}/delete",
            get(admin_panel::confirm_delete).post(admin_panel::delete),
        )
}
