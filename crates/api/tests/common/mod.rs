#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::TimeZone;
use http_body_util::BodyExt;
use portfolio_core::clock::ManualClock;
use portfolio_core::site::SiteInfo;
use portfolio_db::DbPool;
use tower::ServiceExt;

use portfolio_api::config::ServerConfig;
use portfolio_api::router::build_app_router;
use portfolio_api::state::AppState;

pub const ADMIN_PASSWORD: &str = "admin";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// the local project source, and no Telegram delivery.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        secure_cookies: false,
        static_dir: None,
        upstream: None,
        telegram: None,
        site: SiteInfo {
            phone: "+7 900 000-00-00".to_string(),
            whatsapp: "https://wa.me/79000000000".to_string(),
            address: "1 Main St".to_string(),
            emails: vec!["info@example.com".to_string()],
            map_url: "https://maps.example.com/?q=1".to_string(),
            company_name: "Acme Security".to_string(),
            copyright_year: "2025".to_string(),
        },
    }
}

/// The application under test plus handles to its internals.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
}

pub async fn memory_pool() -> DbPool {
    let pool = portfolio_db::create_pool("sqlite::memory:")
        .await
        .expect("in-memory pool");
    portfolio_db::run_migrations(&pool)
        .await
        .expect("migrations");
    pool
}

/// Build the full application router over a fresh in-memory database and a
/// manual clock starting at 2025-05-01 09:00 UTC.
pub async fn build_test_app() -> TestApp {
    build_test_app_with(test_config()).await
}

pub async fn build_test_app_with(config: ServerConfig) -> TestApp {
    let pool = memory_pool().await;
    let clock = Arc::new(ManualClock::new(
        chrono::Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
    ));
    let state = AppState::new(pool, config.clone(), clock.clone());
    let router = build_app_router(state.clone(), &config);
    TestApp {
        router,
        state,
        clock,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<(&str, String)>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some((content_type, body)) => builder
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(cookie), None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    json: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        cookie,
        Some(("application/json", json.to_string())),
    )
    .await
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    form: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        cookie,
        Some(("application/x-www-form-urlencoded", form.to_string())),
    )
    .await
}

pub async fn delete(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, cookie, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
}

/// `admin_auth=<token>` from a response's `Set-Cookie`, ready for a `Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with("admin_auth=") && pair.len() > "admin_auth=".len())
        .map(str::to_string)
}

/// Sign in with the default password and return the cookie pair.
pub async fn login(app: &Router) -> String {
    let response = post_form(app, "/admin/login", "password=admin", None).await;
    session_cookie(&response).expect("login should set the session cookie")
}
