//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::{
    AuthUser, Coordinates, Place, PlaceCategory, PlaceId, PlaceRegion, PlaceStatus,
};

/// Create a test place. The address is unique per id.
pub fn test_place(id: i64, category: PlaceCategory, region: PlaceRegion) -> Place {
    Place {
        id: PlaceId(id),
        name: format!("테스트 장소 {}", id),
        category,
        region,
        status: PlaceStatus::Published,
        description: Some("테스트용 장소".to_string()),
        address_line1: Some(format!("제주특별자치도 테스트로 {}", id)),
        phone: Some("064-000-0000".to_string()),
        hours: None,
        tags: Some(vec!["테스트".to_string()]),
        image_url: Some(format!("https://storage.test/placeimg/{}/{}.jpg", category, id)),
        coordinates: Some(Coordinates {
            lat: 33.38,
            lng: 126.55,
        }),
        // Older ids sort later in the newest-first list
        created_at: Utc::now() - Duration::seconds(10_000 - id),
        updated_at: None,
    }
}

/// Create a test place at a specific point
pub fn test_place_at(id: i64, category: PlaceCategory, coordinates: Coordinates) -> Place {
    Place {
        coordinates: Some(coordinates),
        ..test_place(id, category, PlaceRegion::North)
    }
}

/// Create a test admin user
pub fn test_user() -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        email: Some("admin@galnang.test".to_string()),
    }
}
