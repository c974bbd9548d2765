//! Kakao Local API adapter
//!
//! Address search used to geocode place addresses.

pub mod client;

pub use client::KakaoGeocoder;
