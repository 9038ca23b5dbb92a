mod common;

use std::time::Duration;

use ah_core::error::AppError;
use ah_core::traits::{MockChatProvider, MockVisionProvider};
use ah_services::assistant::{CONNECTION_REPLY, NO_ANSWER_REPLY, VISION_UNAVAILABLE};
use axum::http::StatusCode;
use common::{TestApp, Upstreams};
use serde_json::{json, Value};

/// The reply is written by a detached task; poll until it lands.
async fn wait_for_history(app: &TestApp, farmer_id: &str, len: usize) -> Vec<Value> {
    let uri = format!("/api/farmers/{farmer_id}/chat");
    for _ in 0..100 {
        let (_, history) = app.get(&uri).await;
        let history = history.as_array().cloned().unwrap_or_default();
        if history.len() >= len {
            return history;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("chat history never reached {len} messages");
}

fn chat_answering(answer: Result<Option<String>, AppError>) -> Upstreams {
    let mut chat = MockChatProvider::new();
    chat.expect_ask().times(1).return_once(move |_| answer);
    Upstreams { chat, ..Default::default() }
}

#[tokio::test]
async fn chat_returns_question_and_reply_follows() {
    let app = TestApp::with(chat_answering(Ok(Some("Rotate with legumes.".into()))));
    let farmer_id = app.register("adwoa@example.com", "Adwoa").await;

    let (status, body) = app
        .post("/api/ai/chat", json!({ "question": "How do I restore soil?", "farmerId": farmer_id }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["userMessage"]["role"], "user");
    assert_eq!(body["userMessage"]["content"], "How do I restore soil?");

    let history = wait_for_history(&app, &farmer_id, 2).await;
    assert_eq!(history[0]["role"], "user");
    assert_eq!(history[1]["role"], "assistant");
    assert_eq!(history[1]["content"], "Rotate with legumes.");
}

#[tokio::test]
async fn provider_failure_becomes_fallback_reply() {
    let app = TestApp::with(chat_answering(Err(AppError::upstream("connection reset"))));
    let farmer_id = app.register("kojo@example.com", "Kojo").await;

    let (status, _) = app
        .post("/api/ai/chat", json!({ "question": "When to plant?", "farmerId": farmer_id }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let history = wait_for_history(&app, &farmer_id, 2).await;
    assert_eq!(history[1]["content"], CONNECTION_REPLY);
}

#[tokio::test]
async fn empty_answer_becomes_fallback_reply() {
    let app = TestApp::with(chat_answering(Ok(None)));
    let farmer_id = app.register("akua@example.com", "Akua").await;

    app.post("/api/ai/chat", json!({ "question": "Hello?", "farmerId": farmer_id })).await;

    let history = wait_for_history(&app, &farmer_id, 2).await;
    assert_eq!(history[1]["content"], NO_ANSWER_REPLY);
}

#[tokio::test]
async fn blank_question_is_rejected() {
    let app = TestApp::new();
    let farmer_id = app.register("kwesi@example.com", "Kwesi").await;
    let (status, _) = app.post("/api/ai/chat", json!({ "question": "  ", "farmerId": farmer_id })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn image_analysis_persists_report() {
    let mut vision = MockVisionProvider::new();
    vision
        .expect_diagnose()
        .withf(|url: &str| url == "https://files.example/leaf.jpg")
        .times(1)
        .returning(|_| Ok(Some("Leaf rust. Apply a copper fungicide.".into())));
    let app = TestApp::with(Upstreams { vision, ..Default::default() });
    let farmer_id = app.register("afia@example.com", "Afia").await;

    let (status, report) = app
        .post(
            "/api/ai/analyze-image",
            json!({ "imageUrl": "https://files.example/leaf.jpg", "farmerId": farmer_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["diagnosis"], "Leaf rust. Apply a copper fungicide.");
    assert_eq!(report["farmerId"], farmer_id.as_str());

    let (_, reports) = app.get(&format!("/api/farmers/{farmer_id}/analysis")).await;
    assert_eq!(reports.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_diagnosis_is_server_error_without_report() {
    let mut vision = MockVisionProvider::new();
    vision.expect_diagnose().times(1).returning(|_| Ok(None));
    let app = TestApp::with(Upstreams { vision, ..Default::default() });
    let farmer_id = app.register("yaa@example.com", "Yaa").await;

    let (status, body) = app
        .post(
            "/api/ai/analyze-image",
            json!({ "imageUrl": "https://files.example/pod.jpg", "farmerId": farmer_id }),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": VISION_UNAVAILABLE }));

    let (_, reports) = app.get(&format!("/api/farmers/{farmer_id}/analysis")).await;
    assert!(reports.as_array().unwrap().is_empty());
}
