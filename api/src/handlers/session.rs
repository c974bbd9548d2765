//! Session handlers

use axum::{Extension, Json};
use serde::Serialize;

use crate::domain::entities::AuthUser;
use crate::error::AppError;

/// Current session state
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub is_logged_in: bool,
    pub user: Option<AuthUser>,
}

/// GET /auth/me
///
/// Report whether the caller has a valid session.
pub async fn me(
    user: Option<Extension<AuthUser>>,
) -> Result<Json<super::ActionOk<SessionResponse>>, AppError> {
    let user = user.map(|Extension(u)| u);

    Ok(Json(super::ActionOk::new(SessionResponse {
        is_logged_in: user.is_some(),
        user,
    })))
}
