//! Full admin pages: login, panel, delete confirmation.

use std::fmt::Write as _;

use super::{count_label, escape_html, render_cards, CardActions, CategoryFilter};
use crate::form::ProjectFormFields;
use crate::project::{Category, Project};
use crate::types::ProjectId;

/// Visual weight of a notice block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Danger => "danger",
        }
    }
}

/// A dismissible message shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Where the project form submits to.
#[derive(Debug, Clone, Copy)]
pub enum FormTarget<'a> {
    Create,
    Edit(&'a ProjectId),
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n<div class=\"container\">\n{body}</div>\n</body>\n</html>\n",
        escape_html(title)
    )
}

fn render_notice(notice: Option<&Notice>) -> String {
    match notice {
        Some(n) => format!(
            "<div class=\"alert alert-{} alert-dismissible\" role=\"alert\">{}\
             <button type=\"button\" class=\"btn-close\" data-bs-dismiss=\"alert\"></button></div>\n",
            n.kind.class(),
            escape_html(&n.message)
        ),
        None => String::new(),
    }
}

pub fn render_login_page(notice: Option<&Notice>) -> String {
    let mut body = String::from("<h1>Admin sign in</h1>\n");
    body.push_str(&render_notice(notice));
    body.push_str(
        "<form id=\"loginForm\" method=\"post\" action=\"/admin/login\">\n\
         <input type=\"password\" name=\"password\" id=\"passwordInput\" autocomplete=\"current-password\" required>\n\
         <button type=\"submit\">Sign in</button>\n</form>\n",
    );
    layout("Admin sign in", &body)
}

/// The project form, pre-filled from `fields`.
pub fn render_project_form(fields: &ProjectFormFields, target: FormTarget<'_>) -> String {
    let (heading, action, submit) = match target {
        FormTarget::Create => (
            "Add a new project".to_string(),
            "/admin/projects".to_string(),
            "Add project",
        ),
        FormTarget::Edit(id) => (
            "Edit project".to_string(),
            format!("/admin/projects/{}", escape_html(id.as_str())),
            "Save changes",
        ),
    };

    let mut html = String::new();
    let _ = writeln!(html, "<h2 id=\"formTitle\">{heading}</h2>");
    let _ = writeln!(
        html,
        "<form id=\"projectForm\" method=\"post\" action=\"{action}\">"
    );
    for (name, label, value) in [
        ("title", "Title", &fields.title),
        ("description", "Description", &fields.description),
        ("image", "Image file", &fields.image),
        ("area", "Area", &fields.area),
        ("duration", "Duration", &fields.duration),
        ("location", "Location", &fields.location),
    ] {
        let _ = writeln!(
            html,
            "<label>{label} <input type=\"text\" name=\"{name}\" value=\"{}\"></label>",
            escape_html(value)
        );
    }
    let _ = writeln!(
        html,
        "<label>Work details <textarea name=\"details\">{}</textarea></label>",
        escape_html(&fields.details)
    );
    for category in Category::ALL {
        let checked = if fields.is_checked(category) {
            " checked"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<label><input type=\"checkbox\" name=\"system_{tag}\"{checked}> {label}</label>",
            tag = category.as_str(),
            label = escape_html(category.label()),
        );
    }
    let _ = writeln!(html, "<button type=\"submit\" id=\"submitBtn\">{submit}</button>");
    if matches!(target, FormTarget::Edit(_)) {
        html.push_str("<a id=\"cancelEdit\" href=\"/admin\">Cancel</a>\n");
    }
    html.push_str("</form>\n");
    html
}

/// The admin panel: notice, form, project count, and admin cards.
pub fn render_admin_page(
    projects: &[Project],
    form: &ProjectFormFields,
    target: FormTarget<'_>,
    notice: Option<&Notice>,
) -> String {
    let mut body = String::new();
    body.push_str(
        "<header><h1>Portfolio admin</h1>\
         <form method=\"post\" action=\"/admin/logout\"><button type=\"submit\">Sign out</button></form>\
         </header>\n",
    );
    body.push_str(&render_notice(notice));
    body.push_str(&render_project_form(form, target));
    let _ = writeln!(
        body,
        "<h2>Projects <span id=\"projectsCount\">{}</span></h2>",
        count_label(projects.len())
    );
    body.push_str("<div id=\"projectsList\">\n");
    body.push_str(&render_cards(projects, CategoryFilter::All, CardActions::Admin));
    body.push_str("</div>\n");
    layout("Portfolio admin", &body)
}

/// Confirmation step before a project is deleted.
pub fn render_delete_confirmation(project: &Project) -> String {
    let id = escape_html(project.id.as_str());
    let body = format!(
        "<h1>Delete project</h1>\n\
         <p>Delete <strong id=\"deleteProjectName\">{title}</strong>? This cannot be undone.</p>\n\
         <form method=\"post\" action=\"/admin/projects/{id}/delete\">\
         <button type=\"submit\" id=\"confirmDelete\">Delete</button> \
         <a href=\"/admin\">Cancel</a></form>\n",
        title = escape_html(&project.title),
    );
    layout("Delete project", &body)
}
