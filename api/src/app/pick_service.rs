//! Pick service
//!
//! Chooses one random place. Sampling happens in the catalog store; this
//! service only validates the filters, dispatches to the right procedure and
//! loads the chosen row.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{
    CategoryFilter, Place, PlaceId, PickCriteria, PickInputError, PickRequest, RegionFilter,
};
use crate::domain::geo;
use crate::domain::ports::PlaceRepository;
use crate::error::AppError;

const PICK_FAILED: &str = "랜덤 선택 중 오류가 발생했습니다.";
const NO_MATCH: &str = "조건에 맞는 결과가 없습니다.";
const NO_CATEGORY_MATCH: &str = "해당 카테고리 결과가 없습니다.";
const LOAD_FAILED: &str = "선택된 장소 정보를 불러오지 못했습니다.";

/// A picked place. `distance_m` is set for proximity picks.
#[derive(Debug, Clone, Serialize)]
pub struct PickedPlace {
    #[serde(flatten)]
    pub place: Place,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
}

impl From<PickInputError> for AppError {
    fn from(e: PickInputError) -> Self {
        let message = match e {
            PickInputError::UnknownRegion(v) => format!("지역 값이 올바르지 않습니다: {}", v),
            PickInputError::UnknownCategory(v) => format!("카테고리 값이 올바르지 않습니다: {}", v),
            PickInputError::MissingLocation => "현재 위치 정보가 필요합니다.".to_string(),
            PickInputError::InvalidLocation => "현재 위치 좌표가 올바르지 않습니다.".to_string(),
            PickInputError::InvalidRadius => "검색 반경이 올바르지 않습니다.".to_string(),
        };
        AppError::BadRequest(message)
    }
}

/// Service for random place selection
pub struct PickService<PR>
where
    PR: PlaceRepository + ?Sized,
{
    places: Arc<PR>,
    default_radius_m: u32,
}

impl<PR> PickService<PR>
where
    PR: PlaceRepository + ?Sized,
{
    pub fn new(places: Arc<PR>, default_radius_m: u32) -> Self {
        Self {
            places,
            default_radius_m,
        }
    }

    /// Pick one place matching the main-screen filters
    pub async fn pick(&self, request: &PickRequest) -> Result<PickedPlace, AppError> {
        let criteria = request.criteria(self.default_radius_m)?;

        match criteria {
            PickCriteria::Nearby {
                origin,
                radius_m,
                category,
            } => {
                tracing::debug!(
                    lat = origin.lat,
                    lng = origin.lng,
                    radius_m,
                    %category,
                    "Picking nearby place"
                );

                let id = self
                    .places
                    .pick_one_nearby(&origin, radius_m, category.category())
                    .await
                    .map_err(|e| AppError::from(e).or_internal(PICK_FAILED))?
                    .ok_or_else(|| AppError::not_found(NO_MATCH))?;

                let place = self.load(id).await?;
                let distance_m = place
                    .coordinates
                    .map(|c| geo::distance_m(&origin, &c).round());

                Ok(PickedPlace { place, distance_m })
            }
            PickCriteria::Catalog { region, category } => {
                tracing::debug!(%region, %category, "Picking place");

                let id = self
                    .pick_catalog(region, category)
                    .await?
                    .ok_or_else(|| AppError::NotFound {
                        message: NO_MATCH.to_string(),
                        details: Some(serde_json::json!({
                            "region": region.to_string(),
                            "category": category.to_string(),
                        })),
                    })?;

                let place = self.load(id).await?;
                Ok(PickedPlace {
                    place,
                    distance_m: None,
                })
            }
        }
    }

    /// Quick-pick: any region, one category
    pub async fn pick_by_category(&self, category: &str) -> Result<Place, AppError> {
        let category: CategoryFilter = category
            .parse()
            .map_err(|_| PickInputError::UnknownCategory(category.to_string()))?;

        tracing::debug!(%category, "Quick-picking place");

        let id = self
            .pick_catalog(RegionFilter::All, category)
            .await?
            .ok_or_else(|| AppError::NotFound {
                message: NO_CATEGORY_MATCH.to_string(),
                details: Some(serde_json::json!({ "category": category.to_string() })),
            })?;

        self.load(id).await
    }

    async fn pick_catalog(
        &self,
        region: RegionFilter,
        category: CategoryFilter,
    ) -> Result<Option<PlaceId>, AppError> {
        self.places
            .pick_one_random(region.region(), category.category())
            .await
            .map_err(|e| AppError::from(e).or_internal(PICK_FAILED))
    }

    /// Load the full row for a picked id. A pick that points at nothing is
    /// an internal failure, not a miss.
    async fn load(&self, id: PlaceId) -> Result<Place, AppError> {
        let place = self
            .places
            .find_by_id(&id)
            .await
            .map_err(|e| AppError::internal(LOAD_FAILED, e))?
            .ok_or_else(|| AppError::internal(LOAD_FAILED, format!("Place {} not found", id)))?;

        tracing::info!(place_id = %place.id, name = %place.name, "Picked place");
        Ok(place)
    }
}
