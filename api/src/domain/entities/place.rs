//! Place domain entity
//!
//! A single travel destination in the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub i64);

impl PlaceId {
    /// Ids are assigned by the store starting at 1
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for PlaceId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Place category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Food,
    Cafe,
    Sight,
}

impl std::fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceCategory::Food => write!(f, "food"),
            PlaceCategory::Cafe => write!(f, "cafe"),
            PlaceCategory::Sight => write!(f, "sight"),
        }
    }
}

impl std::str::FromStr for PlaceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(PlaceCategory::Food),
            "cafe" => Ok(PlaceCategory::Cafe),
            "sight" => Ok(PlaceCategory::Sight),
            _ => Err(format!("Unknown place category: {}", s)),
        }
    }
}

/// Region of Jeju Island
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceRegion {
    /// 제주시 일대
    North,
    /// 서귀포 일대
    South,
    East,
    West,
}

impl std::fmt::Display for PlaceRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceRegion::North => write!(f, "north"),
            PlaceRegion::South => write!(f, "south"),
            PlaceRegion::East => write!(f, "east"),
            PlaceRegion::West => write!(f, "west"),
        }
    }
}

impl std::str::FromStr for PlaceRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" => Ok(PlaceRegion::North),
            "south" => Ok(PlaceRegion::South),
            "east" => Ok(PlaceRegion::East),
            "west" => Ok(PlaceRegion::West),
            _ => Err(format!("Unknown place region: {}", s)),
        }
    }
}

/// Publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceStatus {
    Draft,
    #[default]
    Published,
    Hidden,
}

impl std::fmt::Display for PlaceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceStatus::Draft => write!(f, "draft"),
            PlaceStatus::Published => write!(f, "published"),
            PlaceStatus::Hidden => write!(f, "hidden"),
        }
    }
}

impl std::str::FromStr for PlaceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(PlaceStatus::Draft),
            "published" => Ok(PlaceStatus::Published),
            "hidden" => Ok(PlaceStatus::Hidden),
            _ => Err(format!("Unknown place status: {}", s)),
        }
    }
}

/// A WGS84 point. Latitude and longitude always travel together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Build from a pair of nullable columns; a half-filled pair reads as absent.
    pub fn from_columns(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A place in the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub category: PlaceCategory,
    pub region: PlaceRegion,
    pub status: PlaceStatus,
    pub description: Option<String>,
    pub address_line1: Option<String>,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Place {
    pub fn summary(&self) -> PlaceSummary {
        PlaceSummary {
            id: self.id,
            name: self.name.clone(),
            category: self.category,
            region: self.region,
            status: self.status,
            address_line1: self.address_line1.clone(),
            created_at: self.created_at,
        }
    }

    /// Path of the result page for this place
    pub fn result_path(&self) -> String {
        format!("/result/{}", self.id)
    }
}

/// Row shape for the admin list table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSummary {
    pub id: PlaceId,
    pub name: String,
    pub category: PlaceCategory,
    pub region: PlaceRegion,
    pub status: PlaceStatus,
    pub address_line1: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data needed to insert a place
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub name: String,
    pub category: PlaceCategory,
    pub region: PlaceRegion,
    pub status: PlaceStatus,
    pub description: Option<String>,
    pub address_line1: Option<String>,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Partial update. `None` leaves a column untouched; for nullable columns
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceChanges {
    pub name: Option<String>,
    pub category: Option<PlaceCategory>,
    pub region: Option<PlaceRegion>,
    pub status: Option<PlaceStatus>,
    pub description: Option<Option<String>>,
    pub address_line1: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub hours: Option<Option<String>>,
    pub tags: Option<Option<Vec<String>>>,
    pub image_url: Option<Option<String>>,
    pub coordinates: Option<Option<Coordinates>>,
}

impl PlaceChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the changes to an in-memory copy of a place
    #[allow(dead_code)] // used by in-memory stores
    pub fn apply_to(&self, place: &mut Place) {
        if let Some(name) = &self.name {
            place.name = name.clone();
        }
        if let Some(category) = self.category {
            place.category = category;
        }
        if let Some(region) = self.region {
            place.region = region;
        }
        if let Some(status) = self.status {
            place.status = status;
        }
        if let Some(description) = &self.description {
            place.description = description.clone();
        }
        if let Some(address) = &self.address_line1 {
            place.address_line1 = address.clone();
        }
        if let Some(phone) = &self.phone {
            place.phone = phone.clone();
        }
        if let Some(hours) = &self.hours {
            place.hours = hours.clone();
        }
        if let Some(tags) = &self.tags {
            place.tags = tags.clone();
        }
        if let Some(image_url) = &self.image_url {
            place.image_url = image_url.clone();
        }
        if let Some(coordinates) = self.coordinates {
            place.coordinates = coordinates;
        }
    }
}

/// Filters for the paginated admin list
#[derive(Debug, Clone, Default)]
pub struct PlaceListQuery {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    pub category: Option<PlaceCategory>,
    pub region: Option<PlaceRegion>,
    /// Zero-based
    pub page: u64,
    pub page_size: u64,
}

impl PlaceListQuery {
    /// Row offset, capped to what a Postgres `bigint` OFFSET accepts
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }
}

/// One page of list rows plus the total match count
#[derive(Debug, Clone, Serialize)]
pub struct PlacePage {
    pub rows: Vec<PlaceSummary>,
    pub total: u64,
}

/// Normalize a tag input.
///
/// Accepts either a JSON array string (`["a","b"]`) or a comma-separated
/// string (`a, b`). Entries are trimmed, blanks dropped and duplicates
/// removed keeping the first occurrence. Blank input yields `None`.
pub fn parse_tags(raw: &str) -> Option<Vec<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let items: Vec<String> = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(values) => values
            .into_iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Err(_) => raw.split(',').map(str::to_string).collect(),
    };

    Some(dedup_tags(items))
}

fn dedup_tags(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
