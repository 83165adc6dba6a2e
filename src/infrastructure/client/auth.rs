use anyhow::{Result, anyhow};
use reqwest::header::SET_COOKIE;
use serde::Deserialize;

use super::BookclubClient;
use crate::application::auth::SESSION_COOKIE_NAME;
use crate::domain::credentials::{Credentials, RegisterRequest};
use crate::domain::users::User;

pub struct AuthClient<'a> {
    client: &'a BookclubClient,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[allow(dead_code)]
    message: String,
}

impl<'a> AuthClient<'a> {
    pub fn new(client: &'a BookclubClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<User> {
        let url = self.client.endpoint("auth/register")?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .json(payload)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    /// Log in and return the session token carried by the `auth` cookie.
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let url = self.client.endpoint("auth/login")?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .json(credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.client.response_error(response).await);
        }

        let token = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_token_from_set_cookie)
            .ok_or_else(|| anyhow!("login succeeded but no session cookie was returned"))?;

        let _: MessageResponse = self.client.handle_response(response).await?;
        Ok(token)
    }

    pub async fn logout(&self, credentials: &Credentials) -> Result<()> {
        let url = self.client.endpoint("auth/logout")?;
        let response = self
            .client
            .request(reqwest::Method::DELETE, url)
            .json(credentials)
            .send()
            .await?;
        let _: MessageResponse = self.client.handle_response(response).await?;
        Ok(())
    }
}

fn session_token_from_set_cookie(header: &str) -> Option<String> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    (name == SESSION_COOKIE_NAME && !value.is_empty()).then(|| value.to_string())
}
