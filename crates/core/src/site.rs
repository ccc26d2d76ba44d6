//! Public contact details shown across the marketing pages.

use serde::Serialize;

/// Read-only site information. Loaded from configuration at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteInfo {
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub emails: Vec<String>,
    pub map_url: String,
    pub company_name: String,
    pub copyright_year: String,
}

impl SiteInfo {
    /// Footer line, e.g. "© 2025 Acme. All rights reserved."
    pub fn copyright_line(&self) -> String {
        let mut line = format!("© {}", self.copyright_year);
        if !self.company_name.is_empty() {
            line.push(' ');
            line.push_str(&self.company_name);
        }
        line.push_str(". All rights reserved.");
        line
    }
}
