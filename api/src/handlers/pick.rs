//! Pick handlers
//!
//! Public random pick endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::app::PickedPlace;
use crate::domain::entities::{Place, PickRequest};
use crate::error::AppError;
use crate::AppState;

/// Request body for quick-pick
#[derive(Debug, Deserialize)]
pub struct QuickPickRequest {
    #[serde(default)]
    pub category: String,
}

/// POST /pick
///
/// Pick one random place by region (or proximity) and category.
/// Success carries a redirect to the result page.
pub async fn pick(
    State(state): State<AppState>,
    payload: Result<Json<PickRequest>, JsonRejection>,
) -> Result<Json<super::ActionOk<PickedPlace>>, AppError> {
    let Json(request) = payload?;

    let picked = state.pick_service.pick(&request).await?;
    let redirect = picked.place.result_path();

    Ok(Json(super::ActionOk::new(picked).with_redirect(redirect)))
}

/// POST /pick/quick
///
/// Pick one random place of a category anywhere on the island.
pub async fn quick_pick(
    State(state): State<AppState>,
    payload: Result<Json<QuickPickRequest>, JsonRejection>,
) -> Result<Json<super::ActionOk<Place>>, AppError> {
    let Json(request) = payload?;

    let place = state.pick_service.pick_by_category(&request.category).await?;

    Ok(Json(super::ActionOk::new(place)))
}
