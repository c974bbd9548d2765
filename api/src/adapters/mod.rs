//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod kakao;
pub mod postgres;
pub mod supabase;

pub use kakao::KakaoGeocoder;
pub use postgres::PostgresPlaceRepository;
pub use supabase::{SupabaseAuthClient, SupabaseStorageClient};
