pub mod auth;
pub mod books;

use anyhow::{Context, Result, anyhow};
use reqwest::header::COOKIE;
use reqwest::{Client, Url};

use crate::application::auth::SESSION_COOKIE_NAME;
use crate::application::errors::ErrorResponse;

/// Environment variable holding the session token issued by `auth login`.
pub const SESSION_ENV_VAR: &str = "BOOKCLUB_SESSION";

pub struct BookclubClient {
    base_url: Url,
    http: Client,
    session: Option<String>,
}

impl BookclubClient {
    pub fn new(base_url: Url, session: Option<String>) -> Result<Self> {
        let mut normalized = base_url;
        if !normalized.path().ends_with('/') {
            normalized.set_path(&format!("{}/", normalized.path().trim_end_matches('/')));
        }

        let http = Client::builder()
            .user_agent("bookclub-cli/1.0")
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self {
            base_url: normalized,
            http,
            session,
        })
    }

    /// Build a client for `base_url`, picking the session token up from the environment.
    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("invalid API url: {base_url}"))?;
        let session = std::env::var(SESSION_ENV_VAR)
            .ok()
            .filter(|token| !token.trim().is_empty());
        Self::new(url, session)
    }

    pub fn auth(&self) -> auth::AuthClient<'_> {
        auth::AuthClient::new(self)
    }

    pub fn books(&self) -> books::BooksClient<'_> {
        books::BooksClient::new(self)
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid API path: {path}"))
    }

    /// Build a request, attaching the session cookie when one is configured.
    pub(crate) fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.session {
            request = request.header(COOKIE, format!("{SESSION_COOKIE_NAME}={token}"));
        }
        request
    }

    pub(crate) async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .context("failed to deserialize response body")
        } else {
            Err(self.response_error(response).await)
        }
    }

    pub(crate) async fn response_error(&self, response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_slice::<ErrorResponse>(&bytes) {
            if err.errors.is_empty() {
                return anyhow!("request failed ({status}): {}", err.message);
            }
            let details = err
                .errors
                .iter()
                .map(|violation| format!("{}: {}", violation.field, violation.message))
                .collect::<Vec<_>>()
                .join("; ");
            return anyhow!("request failed ({status}): {} ({details})", err.message);
        }

        let message = String::from_utf8_lossy(&bytes);
        anyhow!("request failed ({status}): {message}")
    }
}
