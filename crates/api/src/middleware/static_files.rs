use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use portfolio_core::error::CoreError;

use crate::error::AppError;

/// Refuse `/admin*.html`. The admin panel is only reachable through its
/// session-checked routes, never as a raw file from the static directory.
///
/// The check runs on the path as the file server resolves it, so encoded or
/// padded spellings of the same file are refused too.
pub async fn deny_admin_html(request: Request, next: Next) -> Response {
    let path = resolved_path(request.uri().path());
    if path.starts_with("/admin") && path.to_ascii_lowercase().ends_with(".html") {
        tracing::warn!(raw = request.uri().path(), path = %path, "Blocked direct request for admin HTML");
        return AppError::Core(CoreError::Forbidden("Access denied".into())).into_response();
    }
    next.run(request).await
}

/// Percent-decode `raw` and collapse empty, `.` and `..` segments.
fn resolved_path(raw: &str) -> String {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}
