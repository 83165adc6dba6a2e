use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::domain::AuthError;
use crate::domain::RepositoryError;
use crate::domain::credentials::{Credentials, RegisterRequest};
use crate::domain::ids::UserId;
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::domain::sessions::NewSession;
use crate::domain::users::{NewUser, User, normalize_email};
use crate::infrastructure::auth::{
    generate_session_token, hash_password, hash_token, verify_password,
};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            session_ttl,
        }
    }

    /// Hash the password and store a new user. The request is expected to
    /// have passed validation already.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|err| AuthError::Hashing(err.to_string()))??;

        let user = self
            .users
            .insert(NewUser::new(&request.email, password_hash))
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Resolve the user behind an email/password pair.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let email = normalize_email(&credentials.email);
        if email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = match self.users.get_by_email(&email).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound) => return Err(AuthError::InvalidCredentials),
            Err(err) => return Err(err.into()),
        };

        let password = credentials.password.clone();
        let password_hash = user.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
                .await
                .map_err(|err| AuthError::Hashing(err.to_string()))?;

        if verified {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Store a new session for `user` and return the raw token for the cookie.
    pub async fn create_session(&self, user: &User) -> Result<String, AuthError> {
        let token = generate_session_token();
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.session_ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let session = self
            .sessions
            .insert(NewSession::new(user.id, hash_token(&token), now, expires_at))
            .await?;

        info!(user_id = %user.id, session_id = %session.id, "session created");
        Ok(token)
    }

    /// The user owning a live session token.
    pub async fn resolve_session(&self, token: &str) -> Result<User, AuthError> {
        let session = match self.sessions.get_by_token_hash(&hash_token(token)).await {
            Ok(session) => session,
            Err(RepositoryError::NotFound) => return Err(AuthError::InvalidCredentials),
            Err(err) => return Err(err.into()),
        };

        if session.is_expired() {
            return Err(AuthError::InvalidCredentials);
        }

        match self.users.get(session.user_id).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::NotFound) => Err(AuthError::InvalidCredentials),
            Err(err) => Err(err.into()),
        }
    }

    /// Delete the session named by `token` if it belongs to `owner`.
    /// Returns `false` when there was no such session for that user.
    pub async fn end_session(&self, token: &str, owner: UserId) -> Result<bool, AuthError> {
        let session = match self.sessions.get_by_token_hash(&hash_token(token)).await {
            Ok(session) => session,
            Err(RepositoryError::NotFound) => return Ok(false),
            Err(err) => return Err(err.into()),
        };

        if session.user_id != owner {
            warn!(
                session_id = %session.id,
                user_id = %owner,
                "logout cookie names another user's session"
            );
            return Ok(false);
        }

        match self.sessions.delete(session.id).await {
            Ok(()) => {
                info!(session_id = %session.id, user_id = %session.user_id, "session ended");
                Ok(true)
            }
            Err(RepositoryError::NotFound) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
