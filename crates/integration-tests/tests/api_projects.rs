mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn register_then_plan_a_project() {
    let app = TestApp::new();
    let farmer_id = app.register("yaw@example.com", "Yaw").await;

    let (status, project) = app
        .post(
            "/api/projects",
            json!({ "farmerId": farmer_id, "type": "crop", "name": "Maize field", "landSize": 2.5 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["status"], "active");
    assert_eq!(project["landSize"], 2.5);

    let (status, projects) = app.get(&format!("/api/farmers/{farmer_id}/projects")).await;
    assert_eq!(status, StatusCode::OK);
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["name"], "Maize field");
    assert_eq!(projects[0]["status"], "active");
}

#[tokio::test]
async fn form_style_numbers_are_accepted() {
    let app = TestApp::new();
    let farmer_id = app.register("abena@example.com", "Abena").await;

    let (status, project) = app
        .post(
            &format!("/api/farmers/{farmer_id}/projects"),
            json!({ "name": "Poultry", "type": "livestock", "landSize": "0.75", "expectedYield": "1200", "marketPrice": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["farmerId"], farmer_id.as_str());
    assert_eq!(project["landSize"], 0.75);
    assert_eq!(project["expectedYield"], 1200);
    assert!(project["marketPrice"].is_null());
}

#[tokio::test]
async fn projects_list_oldest_first() {
    let app = TestApp::new();
    let farmer_id = app.register("kofi@example.com", "Kofi").await;
    let uri = format!("/api/farmers/{farmer_id}/projects");

    for name in ["Cassava", "Plantain", "Cocoa"] {
        app.post(&uri, json!({ "name": name })).await;
        app.clock.advance(chrono::Duration::minutes(1));
    }

    let (_, projects) = app.get(&uri).await;
    let names: Vec<_> = projects.as_array().unwrap().iter().map(|p| p["name"].clone()).collect();
    assert_eq!(names, vec![json!("Cassava"), json!("Plantain"), json!("Cocoa")]);
}

#[tokio::test]
async fn update_and_delete() {
    let app = TestApp::new();
    let farmer_id = app.register("efua@example.com", "Efua").await;
    let (_, project) = app
        .post(&format!("/api/farmers/{farmer_id}/projects"), json!({ "name": "Rice", "landSize": 4 }))
        .await;
    let uri = format!("/api/projects/{}", project["id"].as_str().unwrap());

    let (status, updated) = app.put(&uri, json!({ "status": "harvested", "landSize": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "harvested");
    assert!(updated["landSize"].is_null());
    assert_eq!(updated["name"], "Rice");

    let (status, body) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Project not found" }));

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn negative_land_size_is_rejected() {
    let app = TestApp::new();
    let farmer_id = app.register("nana@example.com", "Nana").await;
    let (status, _) = app
        .post(&format!("/api/farmers/{farmer_id}/projects"), json!({ "name": "Yam", "landSize": -1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
