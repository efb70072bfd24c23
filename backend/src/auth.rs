use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use reqwest::Client;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::store::StoreError;

/// Identity attached to a verified bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: Option<String>,
}

/// Token verification, injected into the router state so handler tests can
/// substitute a fixed-token double.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError>;
}

/// Introspects tokens against the identity service's `/user` endpoint.
#[derive(Debug, Clone)]
pub struct GoTrueVerifier {
    client: Client,
    user_url: String,
    service_key: String,
}

impl GoTrueVerifier {
    /// `base_url` is the project root; introspection lives under `/auth/v1`.
    pub fn new(client: Client, base_url: &str, service_key: &str) -> Self {
        Self {
            client,
            user_url: format!("{}/auth/v1/user", base_url.trim_end_matches('/')),
            service_key: service_key.to_string(),
        }
    }
}

#[async_trait]
impl TokenVerifier for GoTrueVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        // A transport failure is a server-side problem, not a bad token.
        let response = self
            .client
            .get(&self.user_url)
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(StoreError::Transport)?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized("Invalid or expired token".to_string()));
        }

        let user = response.json().await.map_err(StoreError::Transport)?;
        Ok(user)
    }
}

/// Gate for protected routes: parses `Authorization: Bearer <token>` and runs
/// the verifier, so the handler body never sees an unauthenticated request.
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let mut pieces = header.split_whitespace();
        let token = match (pieces.next(), pieces.next(), pieces.next()) {
            (Some("Bearer"), Some(token), None) => token,
            _ => {
                return Err(AppError::Unauthorized(
                    "Authorization header missing or malformed".to_string(),
                ));
            }
        };

        state.verifier.verify(token).await
    }
}

/// Fixed-token verifier for tests.
#[derive(Debug, Clone)]
pub struct StaticVerifier {
    token: String,
    user_id: String,
}

impl StaticVerifier {
    pub fn new(token: &str, user_id: &str) -> Self {
        Self {
            token: token.to_string(),
            user_id: user_id.to_string(),
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        if token == self.token {
            Ok(AuthenticatedUser {
                id: self.user_id.clone(),
                email: None,
            })
        } else {
            Err(AppError::Unauthorized("Invalid or expired token".to_string()))
        }
    }
}
