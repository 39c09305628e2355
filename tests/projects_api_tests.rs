mod test_utils;

use test_utils::{sample_project, TestApp};

#[actix_rt::test]
async fn create_and_list_projects_round_trip() {
    let app = TestApp::spawn().await;

    let response = app
        .create_project(&sample_project("Chess Engine", "Rust, Tokio"))
        .await;
    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Project created successfully");
    assert!(body["id"].as_i64().unwrap() >= 1);

    let list = app.list_projects().await;
    assert_eq!(list["total"], 1);
    let projects = list["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["title"], "Chess Engine");
    assert_eq!(projects[0]["tech_stack"], "Rust, Tokio");
    assert_eq!(projects[0]["github_url"], "https://github.com/example/demo");
}

#[actix_rt::test]
async fn create_project_trims_whitespace() {
    let app = TestApp::spawn().await;

    let mut body = sample_project("Ray Tracer", "Rust");
    body["title"] = serde_json::json!("  Ray Tracer  ");
    let response = app.create_project(&body).await;
    assert_eq!(response.status(), 201);

    let list = app.list_projects().await;
    assert_eq!(list["projects"][0]["title"], "Ray Tracer");
}

#[actix_rt::test]
async fn create_project_rejects_oversized_title() {
    let app = TestApp::spawn().await;

    let mut body = sample_project("x", "Rust");
    body["title"] = serde_json::json!("x".repeat(201));
    let response = app.create_project(&body).await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Validation failed");
}

#[actix_rt::test]
async fn create_project_rejects_non_http_github_url() {
    let app = TestApp::spawn().await;

    let mut body = sample_project("CLI Tool", "Rust");
    body["github_url"] = serde_json::json!("ftp://example.com/repo");
    let response = app.create_project(&body).await;

    assert_eq!(response.status(), 400);
}

#[actix_rt::test]
async fn create_project_rejects_missing_required_field() {
    let app = TestApp::spawn().await;

    let response = app
        .create_project(&serde_json::json!({ "title": "No description" }))
        .await;

    // Serde rejects the body before validation runs.
    assert_eq!(response.status(), 400);
}

#[actix_rt::test]
async fn delete_project_removes_the_row() {
    let app = TestApp::spawn().await;

    let response = app.create_project(&sample_project("Doomed", "Rust")).await;
    let id = response.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap();

    let response = app
        .client
        .delete(format!("{}/api/projects/{}", app.address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let list = app.list_projects().await;
    assert_eq!(list["total"], 0);
}

#[actix_rt::test]
async fn delete_missing_project_returns_404() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .delete(format!("{}/api/projects/12345", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}
