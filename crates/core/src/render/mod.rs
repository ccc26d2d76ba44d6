//! Server-side HTML rendering for project cards.
//!
//! Every interpolated value goes through [`escape_html`]. Category filtering
//! only toggles the `hidden` attribute; the card list itself always mirrors
//! the snapshot it was given.

pub mod pages;

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::CoreError;
use crate::project::{Category, Project};

/// Path prefix for project images.
pub const IMAGE_BASE: &str = "/images/portfolio";

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Which cards are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn shows(self, project: &Project) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => project.has_category(category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

// ---------------------------------------------------------------------------
// Category badges
// ---------------------------------------------------------------------------

pub fn category_color(category: Category) -> &'static str {
    match category {
        Category::Fire => "danger",
        Category::Security => "warning",
        Category::Video => "info",
        Category::Access => "success",
    }
}

pub fn category_icon(category: Category) -> &'static str {
    match category {
        Category::Fire => "fire",
        Category::Security => "shield-check",
        Category::Video => "camera-video",
        Category::Access => "key",
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// Whether cards carry the admin edit/delete actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardActions {
    None,
    Admin,
}

pub const EMPTY_STATE: &str = "No projects yet";

/// "1 project", "3 projects".
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 project".to_string()
    } else {
        format!("{count} projects")
    }
}

/// Render the full card list, or the empty-state block for an empty list.
pub fn render_cards(projects: &[Project], filter: CategoryFilter, actions: CardActions) -> String {
    if projects.is_empty() {
        return format!(
            "<div class=\"empty-state text-center py-5\"><h4 class=\"text-muted\">{EMPTY_STATE}</h4></div>\n"
        );
    }

    let mut html = String::new();
    for project in projects {
        html.push_str(&render_card(project, filter.shows(project), actions));
    }
    html
}

/// Render the category filter buttons, marking the active one.
pub fn render_filter_bar(active: CategoryFilter) -> String {
    let mut html = String::from("<div class=\"portfolio-filters\">");
    let all_class = if active == CategoryFilter::All { " active" } else { "" };
    let _ = write!(
        html,
        "<a class=\"btn{all_class}\" data-filter=\"all\" href=\"?category=all\">All</a>"
    );
    for category in Category::ALL {
        let class = if active == CategoryFilter::Only(category) {
            " active"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<a class=\"btn{class}\" data-filter=\"{tag}\" href=\"?category={tag}\">{label}</a>",
            tag = category.as_str(),
            label = escape_html(category.label()),
        );
    }
    html.push_str("</div>\n");
    html
}

fn render_card(project: &Project, visible: bool, actions: CardActions) -> String {
    let id = escape_html(project.id.as_str());
    let title = escape_html(&project.title);

    let mut html = String::new();
    let _ = write!(html, "<div class=\"portfolio-item\" data-id=\"{id}\"");
    for category in &project.categories {
        let _ = write!(html, " data-{}=\"true\"", category.as_str());
    }
    if !visible {
        html.push_str(" hidden");
    }
    html.push_str(">\n<div class=\"portfolio-card\">\n");

    let _ = writeln!(
        html,
        "<img src=\"{IMAGE_BASE}/{image}\" alt=\"{title}\" class=\"img-fluid\">",
        image = escape_html(&project.image),
    );
    let _ = writeln!(html, "<h5 class=\"card-title\">{title}</h5>");
    let _ = writeln!(
        html,
        "<p class=\"card-text\">{}</p>",
        escape_html(&project.description)
    );

    for (label, value) in [
        ("Area", &project.area),
        ("Duration", &project.duration),
        ("Location", &project.location),
    ] {
        if let Some(value) = value {
            let _ = writeln!(
                html,
                "<p class=\"small mb-1\"><strong>{label}:</strong> {}</p>",
                escape_html(value)
            );
        }
    }

    if !project.details.is_empty() {
        html.push_str("<ul class=\"project-details\">");
        for detail in &project.details {
            let _ = write!(html, "<li>{}</li>", escape_html(detail));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<div class=\"project-categories\">");
    for category in &project.categories {
        let _ = write!(
            html,
            "<span class=\"badge bg-{color}\"><i class=\"bi bi-{icon}\"></i> {label}</span>",
            color = category_color(*category),
            icon = category_icon(*category),
            label = escape_html(category.label()),
        );
    }
    html.push_str("</div>\n");

    if !project.date.is_empty() {
        let _ = writeln!(
            html,
            "<small class=\"text-muted\">Added: {}</small>",
            escape_html(&project.date)
        );
    }

    if actions == CardActions::Admin {
        let _ = writeln!(
            html,
            "<div class=\"card-actions\">\
             <a class=\"btn btn-outline-primary btn-sm\" href=\"/admin/projects/{id}/edit\">Edit</a> \
             <a class=\"btn btn-outline-danger btn-sm\" href=\"/admin/projects/{id}/delete\">Delete</a>\
             </div>"
        );
    }

    html.push_str("</div>\n</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectDraft;
    use crate::types::ProjectId;

    fn project(id: &str, title: &str, categories: &[Category]) -> Project {
        ProjectDraft {
            title: title.into(),
            description: "desc".into(),
            categories: categories.iter().copied().collect(),
            image: "a.jpg".into(),
            ..Default::default()
        }
        .into_project(ProjectId::new(id), "01.01.2025".into())
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn empty_list_renders_empty_state() {
        let html = render_cards(&[], CategoryFilter::All, CardActions::None);
        assert!(html.contains(EMPTY_STATE));
        assert!(!html.contains("portfolio-item"));
    }

    #[test]
    fn video_filter_hides_cards_without_video() {
        let projects = vec![
            project("1", "Cameras", &[Category::Video]),
            project("2", "Alarm", &[Category::Fire]),
        ];
        let html = render_cards(
            &projects,
            CategoryFilter::Only(Category::Video),
            CardActions::None,
        );

        assert!(html.contains("data-id=\"1\" data-video=\"true\">"));
        assert!(html.contains("data-id=\"2\" data-fire=\"true\" hidden>"));
        // Both cards are still present.
        assert_eq!(html.matches("class=\"portfolio-item\"").count(), 2);
    }

    #[test]
    fn stored_text_is_escaped() {
        let mut p = project("1", "<script>alert(1)</script>", &[]);
        p.details = vec!["<img onerror=x>".into()];
        let html = render_cards(&[p], CategoryFilter::All, CardActions::None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&lt;img onerror=x&gt;"));
    }

    #[test]
    fn admin_cards_link_to_edit_and_delete() {
        let html = render_cards(&[project("5", "X", &[])], CategoryFilter::All, CardActions::Admin);
        assert!(html.contains("href=\"/admin/projects/5/edit\""));
        assert!(html.contains("href=\"/admin/projects/5/delete\""));

        let public = render_cards(&[project("5", "X", &[])], CategoryFilter::All, CardActions::None);
        assert!(!public.contains("/admin/"));
    }

    #[test]
    fn filter_parses_all_and_tags() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "access".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Access)
        );
        assert!("plumbing".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(1), "1 project");
        assert_eq!(count_label(0), "0 projects");
        assert_eq!(count_label(12), "12 projects");
    }
}
