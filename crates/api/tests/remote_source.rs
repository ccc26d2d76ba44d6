//! Integration tests for the remote project source: one app instance is
//! served on a real socket and a second instance uses it as its backing store.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{body_json, get, get_with_cookie, login, post_json, TestApp};
use portfolio_api::config::UpstreamConfig;
use portfolio_api::store::{HttpProjectSource, ProjectSource, SourceError};
use portfolio_core::project::ProjectDraft;
use portfolio_core::types::ProjectId;
use serde_json::json;

/// Serve a fresh app on `127.0.0.1:0` and return its base URL.
async fn spawn_upstream() -> (String, TestApp) {
    let upstream = common::build_test_app().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = upstream.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), upstream)
}

async fn downstream(base_url: &str, password: &str) -> TestApp {
    let mut config = common::test_config();
    config.upstream = Some(UpstreamConfig {
        base_url: base_url.to_string(),
        password: password.to_string(),
    });
    common::build_test_app_with(config).await
}

fn draft(title: &str) -> ProjectDraft {
    ProjectDraft {
        title: title.into(),
        description: "Remote".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn writes_through_the_api_land_upstream() {
    let (base_url, upstream) = spawn_upstream().await;
    let local = downstream(&base_url, "admin").await;
    let cookie = login(&local.router).await;

    let reply = body_json(
        post_json(
            &local.router,
            "/admin/api/projects",
            json!({"title": "Depot", "description": "Access control", "categories": ["access"]}),
            Some(&cookie),
        )
        .await,
    )
    .await;
    assert_eq!(reply["status"], "success");
    let id = reply["id"].as_str().unwrap().to_string();

    let stored = upstream.state.store.reload().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.as_str(), id);
    assert_eq!(stored[0].title, "Depot");

    // The downstream snapshot was reloaded from upstream.
    let snapshot = local.state.store.snapshot().await;
    assert_eq!(snapshot, stored);
}

#[tokio::test]
async fn update_and_delete_round_through_upstream() {
    let (base_url, upstream) = spawn_upstream().await;
    let source = HttpProjectSource::new(base_url, "admin");

    let id = source.insert(draft("First")).await.unwrap();
    assert!(source.replace(&id, draft("Renamed")).await.unwrap());
    assert!(!source
        .replace(&ProjectId::new("unknown"), draft("Nope"))
        .await
        .unwrap());

    let fetched = source.fetch().await.unwrap().unwrap();
    assert_eq!(fetched[0].title, "Renamed");
    assert_eq!(fetched[0].date, "01.05.2025");

    source.remove(&id).await.unwrap();
    source.remove(&id).await.unwrap();
    assert!(upstream.state.store.reload().await.unwrap().is_empty());
}

#[tokio::test]
async fn expired_remote_session_is_renewed_once() {
    let (base_url, upstream) = spawn_upstream().await;
    let source = HttpProjectSource::new(base_url, "admin");
    source.insert(draft("One")).await.unwrap();

    // Signing in elsewhere replaces the single upstream session.
    login(&upstream.router).await;

    let fetched = source.fetch().await.unwrap().unwrap();
    assert_eq!(fetched.len(), 1);
}

#[tokio::test]
async fn wrong_upstream_password_is_a_persistence_error() {
    let (base_url, _upstream) = spawn_upstream().await;
    let source = HttpProjectSource::new(base_url.clone(), "wrong");
    assert_matches!(source.fetch().await, Err(SourceError::SignIn));

    let local = downstream(&base_url, "wrong").await;
    let cookie = login(&local.router).await;
    let response = get_with_cookie(&local.router, "/admin/api/projects", &cookie).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "PERSISTENCE_ERROR");
}

#[tokio::test]
async fn unreachable_upstream_degrades_public_listing() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let local = downstream(&format!("http://{addr}"), "admin").await;
    let json = body_json(get(&local.router, "/api/projects").await).await;
    assert_eq!(json[0]["id"], "1");
}
