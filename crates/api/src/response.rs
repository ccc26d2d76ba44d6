//! Shared response envelope types for the JSON API.
//!
//! Mutating endpoints reply with a `{ "status": ... }` envelope. Use
//! [`StatusResponse`] instead of ad-hoc `serde_json::json!` so remote clients
//! and handlers agree on the shape.

use portfolio_core::types::ProjectId;
use serde::{Deserialize, Serialize};

/// `{ "status": "success" | "deleted", "id"?: ..., "message"?: ... }`
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Only present on `"error"` replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self::with_status("success")
    }

    pub fn saved(id: ProjectId) -> Self {
        Self {
            id: Some(id),
            ..Self::success()
        }
    }

    pub fn deleted() -> Self {
        Self::with_status("deleted")
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.status == "error"
    }

    fn with_status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            id: None,
            message: None,
            error: None,
        }
    }
}
