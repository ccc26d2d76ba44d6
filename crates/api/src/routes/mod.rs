pub mod admin_panel;
pub mod auth;
pub mod health;
pub mod portfolio;
pub mod project;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (everything except `/health`).
///
/// Route hierarchy:
///
/// ```text
/// /api/projects                           public list (GET)
/// /api/site                               site info (GET)
/// /api/send-form                          contact form (POST)
/// /portfolio?category=                    card fragment (GET)
///
/// /admin/login                            login page (GET), sign in (POST)
/// /admin/logout                           sign out (POST)
/// /admin/api/password                     change password (POST)
/// /admin/api/projects                     list, save (GET, POST), delete (DELETE ?id=)
/// /admin/api/projects/export              backup download (GET)
///
/// /admin                                  panel (GET)
/// /admin/projects                         create (POST)
/// /admin/projects/{id}                    update (POST)
/// /admin/projects/{id}/edit               edit form (GET)
/// /admin/projects/{id}/delete             confirm (GET), delete (POST)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(project::router())
        .merge(site::router())
        .merge(portfolio::router())
        .merge(auth::router())
        .merge(admin_panel::router())
}
