use axum::extract::State;
use axum::Json;
use portfolio_core::site::SiteInfo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SiteInfoResponse {
    #[serde(flatten)]
    pub info: SiteInfo,
    pub copyright: String,
}

/// GET /api/site
pub async fn site_info(State(state): State<AppState>) -> Json<SiteInfoResponse> {
    let info = state.config.site.clone();
    Json(SiteInfoResponse {
        copyright: info.copyright_line(),
        info,
    })
}
