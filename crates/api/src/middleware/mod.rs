//! Request extractors and middleware.
//!
//! - [`auth::AdminSession`] -- Requires the admin session cookie (JSON 401 otherwise).
//! - [`auth::AdminPage`] -- Same check for HTML pages, redirecting to the login page.
//! - [`static_files::deny_admin_html`] -- Refuses direct requests for admin HTML files.

pub mod auth;
pub mod static_files;
