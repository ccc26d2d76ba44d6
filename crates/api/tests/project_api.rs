//! Integration tests for the project JSON API.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{body_json, body_text, delete, get, get_with_cookie, login, post_json};
use portfolio_core::clock::Clock;
use portfolio_db::repositories::KvRepo;
use serde_json::json;

// ---------------------------------------------------------------------------
// Public listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn public_list_falls_back_to_default_project() {
    let app = common::build_test_app().await;
    let response = get(&app.router, "/api/projects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], "1");
    assert_eq!(list[0]["categories"], json!(["fire", "security", "video"]));
}

#[tokio::test]
async fn public_list_falls_back_on_malformed_storage() {
    let app = common::build_test_app().await;
    KvRepo::set(&app.state.pool, "portfolioProjects", "not json", chrono::Utc::now())
        .await
        .unwrap();

    let json = body_json(get(&app.router, "/api/projects").await).await;
    assert_eq!(json[0]["id"], "1");
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_api_requires_session() {
    let app = common::build_test_app().await;

    let list = get(&app.router, "/admin/api/projects").await;
    assert_eq!(list.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(list).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["code"], "UNAUTHORIZED");

    let save = post_json(
        &app.router,
        "/admin/api/projects",
        json!({"title": "A", "description": "B"}),
        None,
    )
    .await;
    assert_eq!(save.status(), StatusCode::UNAUTHORIZED);

    let remove = delete(&app.router, "/admin/api/projects?id=1", None).await;
    assert_eq!(remove.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Create / update / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_assigns_id_and_date() {
    let app = common::build_test_app().await;
    let cookie = login(&app.router).await;

    let response = post_json(
        &app.router,
        "/admin/api/projects",
        json!({"title": "A", "description": "B", "categories": ["fire"]}),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let reply = body_json(response).await;
    assert_eq!(reply["status"], "success");
    let id = reply["id"].as_str().unwrap().to_string();
    assert_eq!(id, app.clock.now().timestamp_millis().to_string());

    let list = body_json(get_with_cookie(&app.router, "/admin/api/projects", &cookie).await).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id.as_str());
    assert_eq!(list[0]["categories"], json!(["fire"]));
    assert_eq!(list[0]["image"], "default.jpg");
    assert_eq!(list[0]["date"], "01.05.2025");

    // Public listing now shows the stored list instead of the default.
    let public = body_json(get(&app.router, "/api/projects").await).await;
    assert_eq!(public[0]["id"], id.as_str());
}

#[tokio::test]
async fn create_with_blank_fields_is_rejected() {
    let app = common::build_test_app().await;
    let cookie = login(&app.router).await;

    let response = post_json(
        &app.router,
        "/admin/api/projects",
        json!({"title": "  ", "description": "B"}),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("title"));

    let stored = KvRepo::get(&app.state.pool, "portfolioProjects").await.unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn update_keeps_id_and_original_date() {
    let app = common::build_test_app().await;
    let cookie = login(&app.router).await;

    let created = body_json(
        post_json(
            &app.router,
            "/admin/api/projects",
            json!({"title": "Office", "description": "CCTV", "area": "200 m²"}),
            Some(&cookie),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    app.clock.advance(chrono::Duration::days(10));
    let cookie = login(&app.router).await;
    let response = post_json(
        &app.router,
        "/admin/api/projects",
        json!({"id": id, "title": "Office 2", "description": "CCTV", "date": "31.12.2030", "area": ""}),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(get_with_cookie(&app.router, "/admin/api/projects", &cookie).await).await;
    assert_eq!(list[0]["id"], id.as_str());
    assert_eq!(list[0]["title"], "Office 2");
    assert_eq!(list[0]["date"], "01.05.2025");
    assert!(list[0].get("area").is_none());
}

#[tokio::test]
async fn update_accepts_numeric_ids() {
    let app = common::build_test_app().await;
    let cookie = login(&app.router).await;
    let created = body_json(
        post_json(
            &app.router,
            "/admin/api/projects",
            json!({"title": "A", "description": "B"}),
            Some(&cookie),
        )
        .await,
    )
    .await;
    let numeric: i64 = created["id"].as_str().unwrap().parse().unwrap();

    let response = post_json(
        &app.router,
        "/admin/api/projects",
        json!({"id": numeric, "title": "A2", "description": "B"}),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn update_of_duplicated_id_is_409() {
    let app = common::build_test_app().await;
    let cookie = login(&app.router).await;
    let raw = r#"[{"id": "7", "title": "A", "description": "a"},
                  {"id": "7", "title": "B", "description": "b"}]"#;
    KvRepo::set(&app.state.pool, "portfolioProjects", raw, chrono::Utc::now())
        .await
        .unwrap();

    let response = post_json(
        &app.router,
        "/admin/api/projects",
        json!({"id": "7", "title": "C", "description": "c"}),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn update_of_unknown_id_is_404() {
    let app = common::build_test_app().await;
    let cookie = login(&app.router).await;

    let response = post_json(
        &app.router,
        "/admin/api/projects",
        json!({"id": "missing", "title": "A", "description": "B"}),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = common::build_test_app().await;
    let cookie = login(&app.router).await;
    let created = body_json(
        post_json(
            &app.router,
            "/admin/api/projects",
            json!({"title": "A", "description": "B"}),
            Some(&cookie),
        )
        .await,
    )
    .await;
    let uri = format!("/admin/api/projects?id={}", created["id"].as_str().unwrap());

    for _ in 0..2 {
        let response = delete(&app.router, &uri, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "deleted");
    }

    let list = body_json(get_with_cookie(&app.router, "/admin/api/projects", &cookie).await).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn delete_without_id_is_400() {
    let app = common::build_test_app().await;
    let cookie = login(&app.router).await;
    let response = delete(&app.router, "/admin/api/projects", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_downloads_pretty_json() {
    let app = common::build_test_app().await;
    let cookie = login(&app.router).await;
    post_json(
        &app.router,
        "/admin/api/projects",
        json!({"title": "A", "description": "B", "details": ["Survey", "Install"]}),
        Some(&cookie),
    )
    .await;

    let response = get_with_cookie(&app.router, "/admin/api/projects/export", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "application/json");
    assert_eq!(
        response.headers().get(CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"portfolio-projects-backup.json\""
    );

    let text = body_text(response).await;
    assert!(text.contains("\n  {"), "expected pretty-printed output");
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed[0]["details"], json!(["Survey", "Install"]));
}
