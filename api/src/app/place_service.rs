//! Place service
//!
//! Admin CRUD over the catalog. Mutations take the authenticated caller so
//! they cannot be reached anonymously. Writes run geocode, then upload, then
//! insert/update, and abort on the first failure.

use std::sync::Arc;

use crate::app::place_form::{ImageUpload, PlaceForm, PlaceListParams};
use crate::domain::entities::{AuthUser, Place, PlaceCategory, PlaceId, PlacePage};
use crate::domain::ports::{Geocoder, ObjectStore, PlaceRepository};
use crate::error::{AppError, DomainError};

const DUPLICATE_ADDRESS: &str = "이미 동일 주소가 등록되어 있습니다.";
const PLACE_NOT_FOUND: &str = "장소를 찾을 수 없습니다.";
const INVALID_ID: &str = "잘못된 장소 ID입니다.";

/// Service for managing places
pub struct PlaceService<PR, GC, OS>
where
    PR: PlaceRepository + ?Sized,
    GC: Geocoder + ?Sized,
    OS: ObjectStore + ?Sized,
{
    places: Arc<PR>,
    geocoder: Arc<GC>,
    storage: Arc<OS>,
}

/// Map a store write failure to the action result taxonomy
fn write_error(e: DomainError, failure_message: &str) -> AppError {
    match e {
        DomainError::Conflict(_) => AppError::Conflict(DUPLICATE_ADDRESS.to_string()),
        DomainError::NotFound(_) => AppError::not_found(PLACE_NOT_FOUND),
        e => AppError::from(e).or_internal(failure_message),
    }
}

fn ensure_valid(id: PlaceId) -> Result<PlaceId, AppError> {
    if id.is_valid() {
        Ok(id)
    } else {
        Err(AppError::BadRequest(INVALID_ID.to_string()))
    }
}

impl<PR, GC, OS> PlaceService<PR, GC, OS>
where
    PR: PlaceRepository + ?Sized,
    GC: Geocoder + ?Sized,
    OS: ObjectStore + ?Sized,
{
    pub fn new(places: Arc<PR>, geocoder: Arc<GC>, storage: Arc<OS>) -> Self {
        Self {
            places,
            geocoder,
            storage,
        }
    }

    /// Paginated admin list
    pub async fn list(&self, params: &PlaceListParams) -> Result<PlacePage, AppError> {
        let query = params.to_query()?;

        self.places
            .list(&query)
            .await
            .map_err(|e| AppError::from(e).or_internal("목록 조회 중 오류가 발생했습니다."))
    }

    /// Get a place by ID
    pub async fn get(&self, id: PlaceId) -> Result<Place, AppError> {
        let id = ensure_valid(id)?;

        self.places
            .find_by_id(&id)
            .await
            .map_err(|e| AppError::from(e).or_internal("조회 중 오류가 발생했습니다."))?
            .ok_or_else(|| AppError::not_found(PLACE_NOT_FOUND))
    }

    /// Create a place from an admin form. Returns the new id.
    pub async fn create(&self, user: &AuthUser, form: PlaceForm) -> Result<PlaceId, AppError> {
        let (mut new_place, image) = form.into_new_place()?;

        if let Some(address) = new_place.address_line1.as_deref() {
            new_place.coordinates = Some(self.geocoder.geocode(address).await?);
        }

        if let Some(image) = image {
            new_place.image_url = Some(self.upload(&image, new_place.category).await?);
        }

        let place = self
            .places
            .create(&new_place)
            .await
            .map_err(|e| write_error(e, "등록 중 오류가 발생했습니다."))?;

        tracing::info!(
            place_id = %place.id,
            name = %place.name,
            user_id = %user.id,
            "Place created"
        );

        Ok(place.id)
    }

    /// Apply a partial update from an admin form
    pub async fn update(
        &self,
        user: &AuthUser,
        id: PlaceId,
        form: PlaceForm,
    ) -> Result<Place, AppError> {
        let current = self.get(id).await?;
        let mut plan = form.update_plan(&current)?;

        if let Some(address) = plan.geocode_address.as_deref() {
            let coordinates = self.geocoder.geocode(address).await?;
            plan.changes.coordinates = Some(Some(coordinates));
        }

        if let Some((image, category)) = &plan.image {
            plan.changes.image_url = Some(Some(self.upload(image, *category).await?));
        }

        if plan.changes.is_empty() {
            tracing::debug!(place_id = %current.id, "No field changes submitted");
        }

        let place = self
            .places
            .update(&current.id, &plan.changes)
            .await
            .map_err(|e| write_error(e, "수정 중 오류가 발생했습니다."))?;

        tracing::info!(place_id = %place.id, user_id = %user.id, "Place updated");

        Ok(place)
    }

    /// Delete a place. Returns whether a row was removed.
    pub async fn delete(&self, user: &AuthUser, id: PlaceId) -> Result<bool, AppError> {
        let id = ensure_valid(id)?;

        let deleted = self
            .places
            .delete(&id)
            .await
            .map_err(|e| AppError::from(e).or_internal("삭제 중 오류가 발생했습니다."))?;

        tracing::info!(place_id = %id, user_id = %user.id, deleted, "Place delete requested");

        Ok(deleted)
    }

    async fn upload(
        &self,
        image: &ImageUpload,
        category: PlaceCategory,
    ) -> Result<String, AppError> {
        let path = image.object_path(category);
        tracing::debug!(%path, size = image.bytes.len(), "Uploading place image");

        self.storage
            .upload(&path, image.bytes.clone(), image.content_type())
            .await
            .map_err(|e| AppError::internal("이미지 업로드 중 오류가 발생했습니다.", e))
    }
}
