//! Supabase Auth client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::AuthUser;
use crate::domain::ports::AuthGateway;
use crate::error::AuthError;

/// Implementation of the AuthGateway port on Supabase Auth (GoTrue)
pub struct SupabaseAuthClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuthClient {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserResponse> for AuthUser {
    fn from(user: UserResponse) -> Self {
        AuthUser {
            id: user.id,
            email: user.email.filter(|e| !e.is_empty()),
        }
    }
}

#[async_trait]
impl AuthGateway for SupabaseAuthClient {
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        if access_token.is_empty() {
            return Ok(None);
        }

        let response = self
            .http
            .get(self.api_url("/user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            200..=299 => {
                let user: UserResponse = response
                    .json()
                    .await
                    .map_err(|e| AuthError::Deserialization(e.to_string()))?;
                Ok(Some(user.into()))
            }
            401 | 403 => Ok(None),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(AuthError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
