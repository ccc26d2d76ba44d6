use axum::routing::get;
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Project JSON API.
///
/// ```text
/// GET    /api/projects                  list_public
/// GET    /admin/api/projects            list
/// POST   /admin/api/projects            save
/// DELETE /admin/api/projects?id=        delete
/// GET    /admin/api/projects/export     export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(project::list_public))
        .route(
            "/admin/api/projects",
            get(project::list)
                .post(project::save)
                .delete(project::delete),
        )
        .route("/admin/api/projects/export", get(project::export))
}
