//! Server-rendered admin panel.
//!
//! Every page re-reads the authoritative list from the store. Mutations
//! redirect back to `/admin` with a `notice` code (post/redirect/get); a
//! rejected form is re-rendered in place with its values kept.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use portfolio_core::error::CoreError;
use portfolio_core::form::{ProjectForm, ProjectFormFields};
use portfolio_core::render::pages::{
    render_admin_page, render_delete_confirmation, FormTarget, Notice, NoticeKind,
};
use portfolio_core::types::ProjectId;
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::auth::AdminPage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PanelQuery {
    #[serde(default)]
    pub notice: Option<String>,
}

/// Map a `notice` query code to the message shown on the panel.
pub fn notice_for(code: &str) -> Option<Notice> {
    let (kind, message) = match code {
        "created" => (NoticeKind::Success, "Project added"),
        "updated" => (NoticeKind::Success, "Project updated"),
        "deleted" => (NoticeKind::Info, "Project deleted"),
        "not_found" => (NoticeKind::Warning, "Project not found"),
        "error" => (NoticeKind::Danger, "The project storage is unavailable, try again later"),
        _ => return None,
    };
    Some(Notice::new(kind, message))
}

fn back_to_panel(code: &str) -> Response {
    Redirect::to(&format!("/admin?notice={code}")).into_response()
}

/// Re-render the panel after a rejected write, keeping what was typed.
async fn rerender(
    state: &AppState,
    fields: &ProjectFormFields,
    target: FormTarget<'_>,
    err: CoreError,
) -> Response {
    let (status, _, message) = AppError::Core(err).classify();
    let kind = if status == StatusCode::BAD_REQUEST {
        NoticeKind::Warning
    } else {
        NoticeKind::Danger
    };
    let projects = state.store.snapshot().await;
    let notice = Notice::new(kind, message);
    (
        status,
        Html(render_admin_page(&projects, fields, target, Some(&notice))),
    )
        .into_response()
}

/// GET /admin
pub async fn dashboard(
    _admin: AdminPage,
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Html<String> {
    let mut notice = query.notice.as_deref().and_then(notice_for);
    let projects = match state.store.reload().await {
        Ok(projects) => projects,
        Err(_) => {
            notice = notice_for("error");
            state.store.snapshot().await
        }
    };
    Html(render_admin_page(
        &projects,
        &ProjectFormFields::default(),
        FormTarget::Create,
        notice.as_ref(),
    ))
}

/// GET /admin/projects/{id}/edit
///
/// The panel with the form filled from the project and pointed at its update.
pub async fn edit_form(
    _admin: AdminPage,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PanelQuery>,
) -> Response {
    let id = ProjectId::new(id);
    let Ok(projects) = state.store.reload().await else {
        return back_to_panel("error");
    };
    let Some(project) = projects.iter().find(|p| p.id == id) else {
        return back_to_panel("not_found");
    };

    let mut fields = ProjectFormFields::default();
    fields.write(project);
    let notice = query.notice.as_deref().and_then(notice_for);
    Html(render_admin_page(
        &projects,
        &fields,
        FormTarget::Edit(&id),
        notice.as_ref(),
    ))
    .into_response()
}

/// POST /admin/projects
pub async fn create(
    _admin: AdminPage,
    State(state): State<AppState>,
    Form(fields): Form<ProjectFormFields>,
) -> Response {
    match state.store.create(fields.read()).await {
        Ok(_) => back_to_panel("created"),
        Err(err) => rerender(&state, &fields, FormTarget::Create, err).await,
    }
}

/// POST /admin/projects/{id}
pub async fn update(
    _admin: AdminPage,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<ProjectFormFields>,
) -> Response {
    let id = ProjectId::new(id);
    match state.store.update(&id, fields.read()).await {
        Ok(()) => back_to_panel("updated"),
        Err(CoreError::NotFound { .. }) => back_to_panel("not_found"),
        Err(err) => rerender(&state, &fields, FormTarget::Edit(&id), err).await,
    }
}

/// GET /admin/projects/{id}/delete
pub async fn confirm_delete(
    _admin: AdminPage,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.store.find(&ProjectId::new(id)).await {
        Ok(Some(project)) => Html(render_delete_confirmation(&project)).into_response(),
        Ok(None) => back_to_panel("not_found"),
        Err(_) => back_to_panel("error"),
    }
}

/// POST /admin/projects/{id}/delete
pub async fn delete(
    _admin: AdminPage,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.store.delete(&ProjectId::new(id)).await {
        Ok(()) => back_to_panel("deleted"),
        Err(_) => back_to_panel("error"),
    }
}
