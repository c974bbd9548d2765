//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod pick_service;
pub mod place_form;
pub mod place_service;

pub use pick_service::{PickService, PickedPlace};
pub use place_form::{ImageUpload, PlaceForm, PlaceListParams};
pub use place_service::PlaceService;
