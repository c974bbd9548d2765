//! Supabase adapters
//!
//! Hosted auth (session lookup) and storage (place images).

pub mod auth;
pub mod storage;

pub use auth::SupabaseAuthClient;
pub use storage::SupabaseStorageClient;
