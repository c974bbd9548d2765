//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit and router tests.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - Manual mocks are more explicit and easier to debug
//! - The place repository mock samples like the store does, which a
//!   canned-return mock can't express

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
