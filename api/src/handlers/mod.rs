//! HTTP handlers
//!
//! Axum request handlers for the API endpoints. Every action answers with
//! the tagged result shape: `ActionOk` on success, `AppError` on failure.

pub mod pick;
pub mod places;
pub mod session;

use serde::Serialize;

pub use pick::{pick, quick_pick};
pub use places::{create_place, delete_place, get_place, list_places, update_place};
pub use session::me;

/// Success body: `{ ok: true, data, redirect? }`
#[derive(Debug, Serialize)]
pub struct ActionOk<T> {
    pub ok: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl<T> ActionOk<T> {
    pub fn new(data: T) -> Self {
        Self {
            ok: true,
            data,
            redirect: None,
        }
    }

    pub fn with_redirect(mut self, path: impl Into<String>) -> Self {
        self.redirect = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_omits_missing_redirect() {
        let json = serde_json::to_value(ActionOk::new(serde_json::json!({ "id": 1 }))).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["data"]["id"], 1);
        assert!(json.get("redirect").is_none());
    }

    #[test]
    fn success_body_with_redirect() {
        let json = serde_json::to_value(ActionOk::new(1).with_redirect("/result/1")).unwrap();
        assert_eq!(json["redirect"], "/result/1");
    }
}
