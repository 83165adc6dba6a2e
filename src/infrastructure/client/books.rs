use anyhow::Result;

use super::BookclubClient;
use crate::domain::book_items::{Book, BookWithAuthor, NewBook};
use crate::domain::ids::BookId;

pub struct BooksClient<'a> {
    client: &'a BookclubClient,
}

impl<'a> BooksClient<'a> {
    pub fn new(client: &'a BookclubClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<BookWithAuthor>> {
        let url = self.client.endpoint("books")?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    /// `None` when the server has no book with this id.
    pub async fn get(&self, id: BookId) -> Result<Option<BookWithAuthor>> {
        let url = self.client.endpoint(&format!("books/{id}"))?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn create(&self, payload: &NewBook) -> Result<Book> {
        let url = self.client.endpoint("books")?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .json(payload)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn update(&self, id: BookId, payload: &NewBook) -> Result<Book> {
        let url = self.client.endpoint(&format!("books/{id}"))?;
        let response = self
            .client
            .request(reqwest::Method::PUT, url)
            .json(payload)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn like(&self, id: BookId) -> Result<Book> {
        let url = self.client.endpoint(&format!("books/{id}/like"))?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn delete(&self, id: BookId) -> Result<Book> {
        let url = self.client.endpoint(&format!("books/{id}"))?;
        let response = self
            .client
            .request(reqwest::Method::DELETE, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}
