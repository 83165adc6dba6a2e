use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::helpers::{create_author, spawn_app};

#[tokio::test]
async fn list_authors_is_public_and_sorted() {
    let app = spawn_app().await;
    create_author(&app, "Ursula K. Le Guin").await;
    create_author(&app, "octavia E. Butler").await;

    let response = Client::new().get(app.url("/authors")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let authors: Vec<Value> = response.json().await.unwrap();
    let names: Vec<&str> = authors.iter().filter_map(|a| a["name"].as_str()).collect();
    assert_eq!(names, vec!["octavia E. Butler", "Ursula K. Le Guin"]);
}

#[tokio::test]
async fn authors_have_no_http_write_surface() {
    let app = spawn_app().await;

    let response = Client::new()
        .post(app.url("/authors"))
        .json(&serde_json::json!({ "name": "Anonymous" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_check_answers_ok() {
    let app = spawn_app().await;

    let response = Client::new().get(app.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}
