//! Auth gateway port

use async_trait::async_trait;

use crate::domain::entities::AuthUser;
use crate::error::AuthError;

/// Resolves a session token to the current user
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `Ok(None)` when the token is missing, expired or rejected
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError>;
}
