//! Contact form submission.

use axum::extract::State;
use axum::Json;
use portfolio_core::contact::ContactRequest;

use crate::error::{AppError, AppResult};
use crate::response::StatusResponse;
use crate::state::AppState;

/// POST /api/send-form
///
/// Validate the submission and forward it to the configured Telegram chat.
pub async fn send_form(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<Json<StatusResponse>> {
    input.validate()?;

    let telegram = state.telegram.as_ref().ok_or_else(|| {
        AppError::InternalError("Telegram configuration incomplete".into())
    })?;

    let text = input.format_message(state.clock.now());
    telegram.send_message(&text).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to deliver contact form to Telegram");
        AppError::InternalError(format!("Telegram delivery failed: {e}"))
    })?;

    tracing::info!("Contact form delivered");
    Ok(Json(
        StatusResponse::success().with_message("Form submitted successfully"),
    ))
}
