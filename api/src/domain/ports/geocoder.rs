//! Geocoding port

use async_trait::async_trait;

use crate::domain::entities::Coordinates;
use crate::error::GeocodeError;

/// Translates a free-text address into coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Coordinates of the best match for `address`.
    /// Returns `GeocodeError::NoResult` when the service finds nothing.
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError>;
}
