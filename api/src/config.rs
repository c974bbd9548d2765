use std::env;

use anyhow::Context;

use crate::domain::entities::{DEFAULT_RADIUS_M, MAX_RADIUS_M};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Hosted backend base URL (storage and auth)
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Service-role key used for storage uploads
    pub supabase_service_role_key: String,
    pub storage_bucket: String,
    pub kakao_api_url: String,
    pub kakao_api_key: String,
    /// Radius used by proximity picks that don't send one
    pub pick_default_radius_m: u32,
    /// Per-IP sustained rate for the pick routes; 0 disables the limiter
    pub pick_rate_per_second: u64,
    pub pick_rate_burst: u32,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let pick_default_radius_m = parse_var(&lookup, "PICK_DEFAULT_RADIUS_M", DEFAULT_RADIUS_M)?;
        anyhow::ensure!(
            (1..=MAX_RADIUS_M).contains(&pick_default_radius_m),
            "PICK_DEFAULT_RADIUS_M must be between 1 and {}",
            MAX_RADIUS_M
        );

        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            supabase_url: or("SUPABASE_URL", "http://localhost:54321"),
            supabase_anon_key: or("SUPABASE_ANON_KEY", ""),
            supabase_service_role_key: or("SUPABASE_SERVICE_ROLE_KEY", ""),
            storage_bucket: or("STORAGE_BUCKET", "placeimg"),
            kakao_api_url: or("KAKAO_API_URL", "https://dapi.kakao.com"),
            kakao_api_key: or("KAKAO_API_KEY", ""),
            pick_default_radius_m,
            pick_rate_per_second: parse_var(&lookup, "PICK_RATE_PER_SECOND", 2)?,
            pick_rate_burst: parse_var(&lookup, "PICK_RATE_BURST", 10)?,
            port: parse_var(&lookup, "PORT", 8080)?,
        })
    }

    /// `(per_second, burst)` for the pick rate limiter, if enabled
    pub fn pick_rate_limit(&self) -> Option<(u64, u32)> {
        (self.pick_rate_per_second > 0)
            .then_some((self.pick_rate_per_second, self.pick_rate_burst.max(1)))
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid value: {}", key, raw)),
        _ => Ok(default),
    }
}
