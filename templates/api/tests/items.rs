mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn create_then_fetch_item() {
    let app = common::TestApp::spawn().await;

    let created = app.server.post("/api/v1/items").json(&json!({ "name": "Widget" })).await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["name"], "Widget");

    let id = body["id"].as_str().unwrap();
    let fetched = app.server.get(&format!("/api/v1/items/{id}")).await;
    fetched.assert_status_ok();

    app.cleanup().await;
}

#[tokio::test]
async fn blank_name_is_a_bad_request() {
    let app = common::TestApp::spawn().await;

    let res = app.server.post("/api/v1/items").json(&json!({ "name": " " })).await;
    res.assert_status_bad_request();

    app.cleanup().await;
}

#[tokio::test]
async fn list_reports_total() {
    let app = common::TestApp::spawn().await;

    app.server.post("/api/v1/items").json(&json!({ "name": "A" })).await;
    let res = app.server.get("/api/v1/items?per_page=10").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["per_page"], 10);

    app.cleanup().await;
}

#[tokio::test]
async fn deleted_item_is_gone() {
    let app = common::TestApp::spawn().await;

    let body: Value = app.server.post("/api/v1/items").json(&json!({ "name": "Temp" })).await.json();
    let path = format!("/api/v1/items/{}", body["id"].as_str().unwrap());

    app.server.delete(&path).await.assert_status(axum::http::StatusCode::NO_CONTENT);
    app.server.get(&path).await.assert_status_not_found();

    app.cleanup().await;
}
