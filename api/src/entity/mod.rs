//! SeaORM entities
//!
//! Table definitions for the catalog store. Domain models live in
//! `domain::entities`; adapters convert between the two.

pub mod places;
