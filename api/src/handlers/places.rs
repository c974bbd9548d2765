//! Place handlers
//!
//! Public catalog reads and the admin CRUD endpoints. Admin mutations take
//! a multipart form: text fields plus an optional `image` file.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::QueryRejection, Multipart, Path, Query, State,
    },
    Extension, Json,
};
use serde::Serialize;

use crate::app::{ImageUpload, PlaceForm, PlaceListParams};
use crate::domain::entities::{AuthUser, Place, PlaceId, PlacePage};
use crate::error::AppError;
use crate::AppState;

/// Form field carrying the image file
const IMAGE_FIELD: &str = "image";

/// Response for a created place
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: PlaceId,
}

/// Response for a delete
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

fn parse_place_id(raw: &str) -> Result<PlaceId, AppError> {
    raw.trim()
        .parse::<i64>()
        .map(PlaceId)
        .map_err(|_| AppError::BadRequest(format!("잘못된 장소 ID입니다: {}", raw)))
}

/// Collect a multipart submission into a `PlaceForm`
async fn read_form(mut multipart: Multipart) -> Result<PlaceForm, AppError> {
    let mut form = PlaceForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            form.image = Some(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await?;
            form.set_field(&name, value);
        }
    }

    Ok(form)
}

/// GET /places
///
/// Paginated list with optional name/category/region filters.
pub async fn list_places(
    State(state): State<AppState>,
    query: Result<Query<PlaceListParams>, QueryRejection>,
) -> Result<Json<super::ActionOk<PlacePage>>, AppError> {
    let Query(params) = query?;

    let page = state.place_service.list(&params).await?;

    Ok(Json(super::ActionOk::new(page)))
}

/// GET /places/:id
pub async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<super::ActionOk<Place>>, AppError> {
    let id = parse_place_id(&id)?;

    let place = state.place_service.get(id).await?;

    Ok(Json(super::ActionOk::new(place)))
}

/// POST /admin/places
///
/// Create a place. The address, if given, is geocoded before insert.
pub async fn create_place(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<super::ActionOk<CreatedResponse>>, AppError> {
    let form = read_form(multipart?).await?;

    let id = state.place_service.create(&user, form).await?;

    Ok(Json(super::ActionOk::new(CreatedResponse { id })))
}

/// PATCH /admin/places/:id
///
/// Partial update; fields missing from the form are left untouched.
pub async fn update_place(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<super::ActionOk<Place>>, AppError> {
    let id = parse_place_id(&id)?;
    let form = read_form(multipart?).await?;

    let place = state.place_service.update(&user, id, form).await?;

    Ok(Json(super::ActionOk::new(place)))
}

/// DELETE /admin/places/:id
pub async fn delete_place(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<super::ActionOk<DeletedResponse>>, AppError> {
    let id = parse_place_id(&id)?;

    let deleted = state.place_service.delete(&user, id).await?;

    Ok(Json(super::ActionOk::new(DeletedResponse { deleted })))
}
