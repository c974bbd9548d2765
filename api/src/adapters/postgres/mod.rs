//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod place_repo;

#[cfg(test)]
mod integration_tests;

pub use place_repo::PostgresPlaceRepository;
