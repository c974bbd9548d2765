//! Domain entities
//!
//! Pure domain models. These are separate from the SeaORM entities in the
//! `entity` module.

pub mod pick;
pub mod place;
pub mod user;

pub use pick::{
    CategoryFilter, PickCriteria, PickInputError, PickRequest, RegionFilter, DEFAULT_RADIUS_M,
    MAX_RADIUS_M,
};
pub use place::{
    parse_tags, Coordinates, NewPlace, Place, PlaceCategory, PlaceChanges, PlaceId,
    PlaceListQuery, PlacePage, PlaceRegion, PlaceStatus, PlaceSummary,
};
pub use user::AuthUser;
