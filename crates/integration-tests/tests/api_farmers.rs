mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn register_applies_defaults() {
    let app = TestApp::new();
    let (status, farmer) = app
        .post(
            "/api/auth/register",
            json!({ "email": "ama@example.com", "name": "Ama Mensah", "farmingType": "mixed" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(farmer["language"], "en");
    assert_eq!(farmer["farmingType"], "mixed");
    assert!(farmer["age"].is_null());
    assert!(farmer["createdAt"].is_string());
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let app = TestApp::new();
    app.register("ama@example.com", "Ama").await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({ "email": "ama@example.com", "name": "Someone Else", "farmingType": "crop" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("ama@example.com"));
}

#[tokio::test]
async fn login_by_email() {
    let app = TestApp::new();
    let id = app.register("kwame@example.com", "Kwame").await;

    let (status, farmer) = app.get("/api/auth/farmer/kwame@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(farmer["id"], id.as_str());

    let (status, body) = app.get("/api/auth/farmer/nobody@example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Farmer not found" }));
}

#[tokio::test]
async fn invalid_registration_is_rejected() {
    let app = TestApp::new();

    let (status, _) = app
        .post("/api/auth/register", json!({ "email": "not-an-email", "name": "X", "farmingType": "crop" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post("/api/auth/register", json!({ "name": "No Email" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn partial_update_keeps_omitted_and_clears_null() {
    let app = TestApp::new();
    let (_, farmer) = app
        .post(
            "/api/auth/register",
            json!({
                "email": "esi@example.com",
                "name": "Esi",
                "age": 41,
                "region": "Volta",
                "farmingType": "livestock"
            }),
        )
        .await;
    let uri = format!("/api/farmers/{}", farmer["id"].as_str().unwrap());

    let (status, updated) = app.put(&uri, json!({ "age": null, "language": "tw" })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["age"].is_null());
    assert_eq!(updated["region"], "Volta");
    assert_eq!(updated["language"], "tw");

    let (_, fetched) = app.get(&uri).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_unknown_farmer_is_not_found() {
    let app = TestApp::new();
    let uri = format!("/api/farmers/{}", uuid::Uuid::now_v7());
    let (status, _) = app.put(&uri, json!({ "name": "Ghost" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
