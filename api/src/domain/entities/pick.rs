//! Random pick filters
//!
//! Raw filter values come from the client as loose strings (`"all"`, `""`,
//! `"nearby"`, ...). They are parsed into typed criteria before any store
//! access happens.

use serde::{Deserialize, Serialize};

use super::place::{Coordinates, PlaceCategory, PlaceRegion};

/// Radius used when the client does not send one
pub const DEFAULT_RADIUS_M: u32 = 2000;

/// Upper bound for a proximity search radius
pub const MAX_RADIUS_M: u32 = 20_000;

/// Region filter as chosen on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionFilter {
    All,
    Nearby,
    Only(PlaceRegion),
}

impl RegionFilter {
    pub fn region(&self) -> Option<PlaceRegion> {
        match self {
            RegionFilter::Only(region) => Some(*region),
            _ => None,
        }
    }
}

impl std::str::FromStr for RegionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(RegionFilter::All),
            "nearby" => Ok(RegionFilter::Nearby),
            other => other.parse().map(RegionFilter::Only),
        }
    }
}

impl std::fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionFilter::All => write!(f, "all"),
            RegionFilter::Nearby => write!(f, "nearby"),
            RegionFilter::Only(region) => write!(f, "{}", region),
        }
    }
}

/// Category filter; `All` disables category matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(PlaceCategory),
}

impl CategoryFilter {
    pub fn category(&self) -> Option<PlaceCategory> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(*category),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Pick payload as sent by the client
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PickRequest {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    /// Meters
    #[serde(default)]
    pub radius: Option<f64>,
}

/// Validated pick criteria. Each variant maps to one stored procedure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickCriteria {
    Nearby {
        origin: Coordinates,
        radius_m: u32,
        category: CategoryFilter,
    },
    Catalog {
        region: RegionFilter,
        category: CategoryFilter,
    },
}

/// Reasons a pick payload is rejected before reaching the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickInputError {
    UnknownRegion(String),
    UnknownCategory(String),
    MissingLocation,
    InvalidLocation,
    InvalidRadius,
}

impl PickRequest {
    /// Parse into criteria, falling back to `default_radius_m` when no radius is given
    pub fn criteria(&self, default_radius_m: u32) -> Result<PickCriteria, PickInputError> {
        let region_raw = self.region.as_deref().unwrap_or_default();
        let category_raw = self.category.as_deref().unwrap_or_default();

        let region: RegionFilter = region_raw
            .parse()
            .map_err(|_| PickInputError::UnknownRegion(region_raw.to_string()))?;
        let category: CategoryFilter = category_raw
            .parse()
            .map_err(|_| PickInputError::UnknownCategory(category_raw.to_string()))?;

        if region != RegionFilter::Nearby {
            return Ok(PickCriteria::Catalog { region, category });
        }

        let origin = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Coordinates { lat, lng },
            _ => return Err(PickInputError::MissingLocation),
        };
        if !origin.is_valid() {
            return Err(PickInputError::InvalidLocation);
        }

        let radius_m = match self.radius {
            None => default_radius_m,
            Some(r) if r.is_finite() && r >= 1.0 && r <= MAX_RADIUS_M as f64 => r.round() as u32,
            Some(_) => return Err(PickInputError::InvalidRadius),
        };

        Ok(PickCriteria::Nearby {
            origin,
            radius_m,
            category,
        })
    }
}
