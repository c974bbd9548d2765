//! Authentication
//!
//! Bearer session middleware for the admin and session-aware routes.

mod session;

pub use session::{auth_middleware, optional_auth_middleware};
