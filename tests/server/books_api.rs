use bookclub::domain::ids::AuthorId;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use crate::helpers::{
    count_rows, create_author, create_book, create_book_response, spawn_app, spawn_app_with_auth,
};

#[tokio::test]
async fn create_book_returns_created_book() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;

    let response = app
        .authed(Client::new().post(app.url("/books")))
        .json(&json!({
            "title": "  The Left Hand of Darkness ",
            "author_id": author.id,
            "isbn": "9780441478125",
            "page_count": 304,
            "year_published": 1969,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "The Left Hand of Darkness");
    assert_eq!(body["author_id"], i64::from(author.id));
    assert_eq!(body["page_count"], 304);
    assert_eq!(count_rows(&app, "books").await, 1);
}

#[tokio::test]
async fn create_book_with_duplicate_title_conflicts() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;
    create_book(&app, "The Dispossessed", author.id).await;

    let response = create_book_response(&app, "The Dispossessed", author.id).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Title is already taken");
    assert_eq!(count_rows(&app, "books").await, 1);
}

#[tokio::test]
async fn create_book_with_missing_author_is_bad_request() {
    let app = spawn_app_with_auth().await;

    let response = create_book_response(&app, "Orphan", AuthorId::new(9999)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Author doesn't exist");
    assert_eq!(count_rows(&app, "books").await, 0);
}

#[tokio::test]
async fn create_book_with_blank_title_fails_validation() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;

    let response = create_book_response(&app, "   ", author.id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "validation failed");
    assert_eq!(body["errors"][0]["field"], "title");
}

#[tokio::test]
async fn writes_require_a_session() {
    let app = spawn_app().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;
    let client = Client::new();

    let create = client
        .post(app.url("/books"))
        .json(&json!({ "title": "Rocannon's World", "author_id": author.id }))
        .send()
        .await
        .unwrap();
    assert_eq!(create.status(), StatusCode::UNAUTHORIZED);

    let update = client
        .put(app.url("/books/1"))
        .json(&json!({ "title": "Rocannon's World", "author_id": author.id }))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status(), StatusCode::UNAUTHORIZED);

    let like = client.post(app.url("/books/1/like")).send().await.unwrap();
    assert_eq!(like.status(), StatusCode::UNAUTHORIZED);

    let delete = client.delete(app.url("/books/1")).send().await.unwrap();
    assert_eq!(delete.status(), StatusCode::UNAUTHORIZED);

    let forged = client
        .delete(app.url("/books/1"))
        .header("Cookie", "auth=forged-token")
        .send()
        .await
        .unwrap();
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_books_includes_authors_and_like_counts() {
    let app = spawn_app_with_auth().await;
    let le_guin = create_author(&app, "Ursula K. Le Guin").await;
    let butler = create_author(&app, "Octavia E. Butler").await;
    create_book(&app, "The Word for World Is Forest", le_guin.id).await;
    create_book(&app, "Parable of the Sower", butler.id).await;

    let books: Vec<Value> = Client::new()
        .get(app.url("/books"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["title"], "The Word for World Is Forest");
    assert_eq!(books[0]["author"]["name"], "Ursula K. Le Guin");
    assert_eq!(books[1]["author"]["name"], "Octavia E. Butler");
    assert_eq!(books[1]["like_count"], 0);
}

#[tokio::test]
async fn get_book_returns_book_with_author() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;
    let book = create_book(&app, "The Tombs of Atuan", author.id).await;

    let response = Client::new()
        .get(app.url(&format!("/books/{}", book.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], i64::from(book.id));
    assert_eq!(body["author"]["id"], i64::from(author.id));
}

#[tokio::test]
async fn get_missing_book_returns_null() {
    let app = spawn_app().await;

    let response = Client::new()
        .get(app.url("/books/424242"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn update_book_replaces_fields() {
    let app = spawn_app_with_auth().await;
    let le_guin = create_author(&app, "Ursula K. Le Guin").await;
    let butler = create_author(&app, "Octavia E. Butler").await;
    let book = create_book(&app, "Draft Title", le_guin.id).await;

    let response = app
        .authed(Client::new().put(app.url(&format!("/books/{}", book.id))))
        .json(&json!({ "title": "Dawn", "author_id": butler.id, "page_count": 264 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Dawn");
    assert_eq!(body["author_id"], i64::from(butler.id));
    assert_eq!(body["page_count"], 264);
    assert!(body["year_published"].is_null());
}

#[tokio::test]
async fn update_book_to_taken_title_conflicts() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;
    create_book(&app, "Lavinia", author.id).await;
    let other = create_book(&app, "Powers", author.id).await;

    let response = app
        .authed(Client::new().put(app.url(&format!("/books/{}", other.id))))
        .json(&json!({ "title": "Lavinia", "author_id": author.id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_book_with_missing_author_is_bad_request() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;
    let book = create_book(&app, "Voices", author.id).await;

    let response = app
        .authed(Client::new().put(app.url(&format!("/books/{}", book.id))))
        .json(&json!({ "title": "Voices", "author_id": 9999 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Author doesn't exist");
}

#[tokio::test]
async fn update_missing_book_is_bad_request() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;

    let response = app
        .authed(Client::new().put(app.url("/books/9999")))
        .json(&json!({ "title": "Gifts", "author_id": author.id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count_rows(&app, "books").await, 0);
}

#[tokio::test]
async fn delete_book_returns_it_then_404s() {
    let app = spawn_app_with_auth().await;
    let author = create_author(&app, "Ursula K. Le Guin").await;
    let book = create_book(&app, "The Beginning Place", author.id).await;
    let url = app.url(&format!("/books/{}", book.id));

    let response = app
        .authed(Client::new().delete(&url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "The Beginning Place");
    assert_eq!(count_rows(&app, "books").await, 0);

    let again = app
        .authed(Client::new().delete(&url))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_book_payload_fails_validation() {
    let app = spawn_app_with_auth().await;

    let response = app
        .authed(Client::new().post(app.url("/books")))
        .header("Content-Type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
