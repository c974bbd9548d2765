//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models for places, pick filters and callers
//! - `ports`: Trait definitions for the catalog store and external gateways
//! - `geo`: Distance math

pub mod entities;
pub mod geo;
pub mod ports;
