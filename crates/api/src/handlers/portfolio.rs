//! Public portfolio fragment.

use axum::extract::{Query, State};
use axum::response::Html;
use portfolio_core::render::{render_cards, render_filter_bar, CardActions, CategoryFilter};
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    #[serde(default)]
    pub category: String,
}

/// GET /portfolio?category=<tag|all>
///
/// Filter bar plus every card. Cards outside the selected category are kept
/// in the markup but hidden.
pub async fn fragment(
    State(state): State<AppState>,
    Query(query): Query<PortfolioQuery>,
) -> AppResult<Html<String>> {
    let filter: CategoryFilter = query.category.trim().parse()?;
    let projects = state.store.load().await;

    let mut html = render_filter_bar(filter);
    html.push_str("<div class=\"portfolio-grid\" id=\"portfolioGrid\">\n");
    html.push_str(&render_cards(&projects, filter, CardActions::None));
    html.push_str("</div>\n");
    Ok(Html(html))
}
