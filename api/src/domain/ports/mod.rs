//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod auth;
pub mod geocoder;
pub mod repositories;
pub mod storage;

pub use auth::AuthGateway;
pub use geocoder::Geocoder;
pub use repositories::PlaceRepository;
pub use storage::ObjectStore;
