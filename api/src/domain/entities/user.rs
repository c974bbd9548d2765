//! Authenticated caller
//!
//! Identity is owned by the hosted auth provider; this is an opaque pass-through.

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}
