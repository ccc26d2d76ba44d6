use axum::routing::get;
use axum::Router;

use crate::handlers::portfolio;
use crate::state::AppState;

/// GET /portfolio?category=<tag|all>
pub fn router() -> Router<AppState> {
    Router::new().route("/portfolio", get(portfolio::fragment))
}
