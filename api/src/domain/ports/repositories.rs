//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Coordinates, NewPlace, Place, PlaceCategory, PlaceChanges, PlaceId, PlaceListQuery, PlacePage,
    PlaceRegion,
};
use crate::error::DomainError;

/// Repository for Place entities
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Find a place by ID
    async fn find_by_id(&self, id: &PlaceId) -> Result<Option<Place>, DomainError>;

    /// List places newest first, with the total count of matches
    async fn list(&self, query: &PlaceListQuery) -> Result<PlacePage, DomainError>;

    /// Insert a new place.
    /// A uniqueness violation is reported as `DomainError::Conflict`.
    async fn create(&self, place: &NewPlace) -> Result<Place, DomainError>;

    /// Apply a partial update; only the fields set in `changes` are written.
    /// Returns `DomainError::NotFound` if the row does not exist.
    async fn update(&self, id: &PlaceId, changes: &PlaceChanges) -> Result<Place, DomainError>;

    /// Delete a place. Returns whether a row was removed.
    async fn delete(&self, id: &PlaceId) -> Result<bool, DomainError>;

    // Random selection

    /// Uniformly random place id among places matching the filters.
    /// `None` filters match everything.
    async fn pick_one_random(
        &self,
        region: Option<PlaceRegion>,
        category: Option<PlaceCategory>,
    ) -> Result<Option<PlaceId>, DomainError>;

    /// Uniformly random place id among places within `radius_m` meters
    /// (geodesic) of `origin`, optionally restricted to a category.
    async fn pick_one_nearby(
        &self,
        origin: &Coordinates,
        radius_m: u32,
        category: Option<PlaceCategory>,
    ) -> Result<Option<PlaceId>, DomainError>;
}
