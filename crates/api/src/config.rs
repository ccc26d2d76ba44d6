use std::path::PathBuf;

use portfolio_core::site::SiteInfo;

/// Default admin password when neither `ADMIN_PASSWORD` nor a stored override
/// is set. `main` warns when it is in effect.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite connection URL.
    pub database_url: String,
    /// Password accepted when no override has been stored.
    pub admin_password: String,
    /// Add `Secure` to the session cookie.
    pub secure_cookies: bool,
    /// Directory with the static site, served as the fallback when set.
    pub static_dir: Option<PathBuf>,
    /// Remote admin API to use as the project source instead of the local store.
    pub upstream: Option<UpstreamConfig>,
    /// Telegram delivery for the contact form. Disabled when unset.
    pub telegram: Option<TelegramConfig>,
    /// Public contact details served by `/api/site`.
    pub site: SiteInfo,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the remote instance, without a trailing slash.
    pub base_url: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_url: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `DATABASE_URL`         | `sqlite://portfolio.db?mode=rwc` |
    /// | `ADMIN_PASSWORD`       | `admin`                          |
    /// | `SECURE_COOKIES`       | `false`                          |
    /// | `STATIC_DIR`           | unset                            |
    /// | `UPSTREAM_API_URL`     | unset                            |
    /// | `UPSTREAM_PASSWORD`    | value of `ADMIN_PASSWORD`        |
    /// | `TELEGRAM_BOT_TOKEN`   | unset                            |
    /// | `TELEGRAM_CHAT_ID`     | unset                            |
    /// | `TELEGRAM_API_URL`     | `https://api.telegram.org`       |
    /// | `SITE_*`               | empty, copyright year = current  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://portfolio.db?mode=rwc".into());

        let admin_password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.into());

        let secure_cookies: bool = std::env::var("SECURE_COOKIES")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SECURE_COOKIES must be true or false");

        let static_dir = non_empty_var("STATIC_DIR").map(PathBuf::from);

        let upstream = non_empty_var("UPSTREAM_API_URL").map(|url| UpstreamConfig {
            base_url: url.trim_end_matches('/').to_string(),
            password: non_empty_var("UPSTREAM_PASSWORD").unwrap_or_else(|| admin_password.clone()),
        });

        let telegram = match (
            non_empty_var("TELEGRAM_BOT_TOKEN"),
            non_empty_var("TELEGRAM_CHAT_ID"),
        ) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig {
                api_url: non_empty_var("TELEGRAM_API_URL")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.into())
                    .trim_end_matches('/')
                    .to_string(),
                bot_token,
                chat_id,
            }),
            _ => None,
        };

        let site = SiteInfo {
            phone: std::env::var("SITE_PHONE").unwrap_or_default(),
            whatsapp: std::env::var("SITE_WHATSAPP").unwrap_or_default(),
            address: std::env::var("SITE_ADDRESS").unwrap_or_default(),
            emails: split_list(&std::env::var("SITE_EMAILS").unwrap_or_default()),
            map_url: std::env::var("SITE_MAP_URL").unwrap_or_default(),
            company_name: std::env::var("SITE_COMPANY_NAME").unwrap_or_default(),
            copyright_year: non_empty_var("SITE_COPYRIGHT_YEAR")
                .unwrap_or_else(|| chrono::Utc::now().format("%Y").to_string()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            admin_password,
            secure_cookies,
            static_dir,
            upstream,
            telegram,
            site,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
