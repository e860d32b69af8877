//! Integration tests for the CRUD surface: workspaces, projects,
//! prompt templates, and API settings.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_expect, send_json};
use serde_json::json;
use sqlx::PgPool;

fn template_body(workspace_id: i64, order_index: i32, title: &str) -> serde_json::Value {
    json!({
        "workspace_id": workspace_id,
        "order_index": order_index,
        "phase": "research",
        "title": title,
        "main_question": "What is the market?",
        "overview": "Overview",
        "deliverables": "Report",
        "tags": ["market"],
        "prompt_content": {
            "phase1": {"title": "Survey", "content": "Describe [industry]."},
            "phase2": {"title": "Deep dive", "content": "### ▼▼▼ paste ▼▼▼\nx\n### ▲▲▲ end ▲▲▲"},
            "phase3": {"title": "Synthesis", "content": "### ▼▼▼ paste ▼▼▼\nx\n### ▲▲▲ end ▲▲▲"},
        },
        "variables": ["industry"],
    })
}

async fn create_workspace(app: &axum::Router, slug: &str) -> i64 {
    let json = post_expect(
        app,
        "/api/v1/workspaces",
        json!({"name": format!("Workspace {slug}"), "slug": slug}),
        StatusCode::CREATED,
    )
    .await;
    json["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Workspaces
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_workspace_slug_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_workspace(&app, "alpha").await;

    let response = send_json(
        app.clone(),
        "POST",
        "/api/v1/workspaces",
        json!({"name": "Another", "slug": "alpha"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_workspace_slug_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send_json(
        app,
        "POST",
        "/api/v1/workspaces",
        json!({"name": "Nameless", "slug": "  "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn project_lifecycle_over_http(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ws_id = create_workspace(&app, "projects").await;

    let created = post_expect(
        &app,
        "/api/v1/projects",
        json!({
            "workspace_id": ws_id,
            "name": "Launch plan",
            "company_name": "Acme",
            "industry": "Tech",
        }),
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(created["status"], "draft");
    let id = created["id"].as_i64().unwrap();

    // Partial update touches only the provided fields.
    let updated = send_json(
        app.clone(),
        "PUT",
        &format!("/api/v1/projects/{id}"),
        json!({"target_market": "SMBs"}),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["target_market"], "SMBs");
    assert_eq!(updated["company_name"], "Acme");

    // Delete archives; the row remains readable.
    let response = delete(app.clone(), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = get(app.clone(), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["status"], "archived");
}

#[sqlx::test(migrations = "../../migrations")]
async fn invalid_project_status_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ws_id = create_workspace(&app, "statuses").await;
    let created = post_expect(
        &app,
        "/api/v1/projects",
        json!({
            "workspace_id": ws_id,
            "name": "Plan",
            "company_name": "Acme",
            "industry": "Tech",
        }),
        StatusCode::CREATED,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = send_json(
        app,
        "PUT",
        &format!("/api/v1/projects/{id}"),
        json!({"status": "exploded"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Prompt templates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn malformed_prompt_content_is_rejected_at_creation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ws_id = create_workspace(&app, "templates").await;

    let mut body = template_body(ws_id, 1, "Broken");
    body["prompt_content"] = json!({"phase1": {"title": "Only one", "content": "x"}});

    let response = send_json(app, "POST", "/api/v1/prompt-templates", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../migrations")]
async fn missing_paste_zone_is_rejected_at_creation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ws_id = create_workspace(&app, "zones").await;

    let mut body = template_body(ws_id, 1, "No zone");
    body["prompt_content"]["phase2"]["content"] = json!("No markers at all");

    let response = send_json(app, "POST", "/api/v1/prompt-templates", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn system_templates_cannot_be_deleted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ws_id = create_workspace(&app, "system").await;

    let mut body = template_body(ws_id, 1, "Built in");
    body["is_custom"] = json!(false);
    let created = post_expect(&app, "/api/v1/prompt-templates", body, StatusCode::CREATED).await;
    let id = created["id"].as_i64().unwrap();

    let response = delete(app, &format!("/api/v1/prompt-templates/{id}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn custom_template_delete_deactivates(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ws_id = create_workspace(&app, "custom").await;

    let created = post_expect(
        &app,
        "/api/v1/prompt-templates",
        template_body(ws_id, 1, "Mine"),
        StatusCode::CREATED,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/api/v1/prompt-templates/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone from the active listing, still present unfiltered.
    let active = get(
        app.clone(),
        &format!("/api/v1/prompt-templates?workspace_id={ws_id}&active=true"),
    )
    .await;
    assert_eq!(body_json(active).await.as_array().unwrap().len(), 0);

    let all = get(
        app,
        &format!("/api/v1/prompt-templates?workspace_id={ws_id}"),
    )
    .await;
    assert_eq!(body_json(all).await.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Api settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn settings_responses_mask_secrets(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ws_id = create_workspace(&app, "settings").await;

    let response = send_json(
        app.clone(),
        "PUT",
        "/api/v1/api-settings",
        json!({
            "workspace_id": ws_id,
            "gemini_api_key": "sk-very-secret",
            "notion_api_token": "ntn-token",
            "notion_database_id": "db-1",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["gemini_api_key"], "********");
    assert_eq!(json["notion_api_token"], "********");
    assert_eq!(json["notion_database_id"], "db-1");

    let fetched = get(app, &format!("/api/v1/api-settings?workspace_id={ws_id}")).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["gemini_api_key"], "********");
}

#[sqlx::test(migrations = "../../migrations")]
async fn echoed_mask_does_not_overwrite_stored_secret(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let ws_id = create_workspace(&app, "masks").await;

    send_json(
        app.clone(),
        "PUT",
        "/api/v1/api-settings",
        json!({"workspace_id": ws_id, "gemini_api_key": "sk-real"}),
    )
    .await;

    // A client that saves the settings form echoes the mask back.
    let response = send_json(
        app,
        "PUT",
        "/api/v1/api-settings",
        json!({
            "workspace_id": ws_id,
            "gemini_api_key": "********",
            "api_rate_limit": 120,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["api_rate_limit"], 120);

    let stored = strata_db::repositories::ApiSettingsRepo::find_by_workspace(&pool, ws_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.gemini_api_key.as_deref(), Some("sk-real"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn missing_settings_return_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ws_id = create_workspace(&app, "nothing").await;

    let response = get(app, &format!("/api/v1/api-settings?workspace_id={ws_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
