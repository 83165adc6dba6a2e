use bookclub::domain::CatalogError;
use bookclub::domain::ids::UserId;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::helpers::{count_rows, create_author, create_book, spawn_app_with_auth};

async fn like_count(app: &crate::helpers::TestApp, path: &str) -> i64 {
    let body: Value = Client::new()
        .get(app.url(path))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["like_count"].as_i64().unwrap()
}

#[tokio::test]
async fn like_records_one_like_per_user() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;
    let book = create_book(&app, "A Wizard of Earthsea", author.id).await;
    let path = format!("/books/{}", book.id);

    let response = app
        .authed(Client::new().post(app.url(&format!("{path}/like"))))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], i64::from(book.id));
    assert_eq!(like_count(&app, &path).await, 1);

    let repeat = app
        .authed(Client::new().post(app.url(&format!("{path}/like"))))
        .send()
        .await
        .unwrap();
    assert_eq!(repeat.status(), StatusCode::OK);
    assert_eq!(like_count(&app, &path).await, 1);
}

#[tokio::test]
async fn liking_missing_book_is_bad_request() {
    let app = spawn_app_with_auth().await;

    let response = app
        .authed(Client::new().post(app.url("/books/9999/like")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Book or user don't exist");
    assert_eq!(count_rows(&app, "book_likes").await, 0);
}

#[tokio::test]
async fn liking_as_missing_user_leaves_count_unchanged() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;
    let book = create_book(&app, "The Farthest Shore", author.id).await;

    let result = app.state.book_service.like(book.id, UserId::new(9999)).await;
    assert!(matches!(
        result,
        Err(CatalogError::ReferenceNotFound("Book or user don't exist"))
    ));

    assert_eq!(count_rows(&app, "book_likes").await, 0);
    assert_eq!(like_count(&app, &format!("/books/{}", book.id)).await, 0);
}

#[tokio::test]
async fn deleting_a_book_removes_its_likes() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;
    let book = create_book(&app, "Tehanu", author.id).await;

    app.authed(Client::new().post(app.url(&format!("/books/{}/like", book.id))))
        .send()
        .await
        .unwrap();
    assert_eq!(count_rows(&app, "book_likes").await, 1);

    let response = app
        .authed(Client::new().delete(app.url(&format!("/books/{}", book.id))))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(count_rows(&app, "book_likes").await, 0);
}
