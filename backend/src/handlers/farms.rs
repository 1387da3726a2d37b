//! Farm HTTP handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::{geo, Farm, MapView};

use crate::error::AppResult;
use crate::services::FarmService;
use crate::AppState;

/// Query parameters for the farm list
#[derive(Debug, Deserialize)]
pub struct FarmListQuery {
    /// Phone number of the owning account
    pub phone: String,
}

/// List the caller's farms, in stable (oldest-first) order
pub async fn list_farms(
    State(state): State<AppState>,
    Query(query): Query<FarmListQuery>,
) -> AppResult<Json<Vec<Farm>>> {
    let service = FarmService::new(state.db.clone());
    let farms = service.list_for_phone(&query.phone).await?;
    Ok(Json(farms))
}

/// Get a farm by ID
pub async fn get_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
) -> AppResult<Json<Farm>> {
    let service = FarmService::new(state.db.clone());
    let farm = service.get(farm_id).await?;
    Ok(Json(farm))
}

/// Map viewport for a farm: a fitted polygon view, or the placeholder when
/// the boundary cannot form one
pub async fn get_farm_map(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
) -> AppResult<Json<MapView>> {
    let service = FarmService::new(state.db.clone());
    let farm = service.get(farm_id).await?;
    Ok(Json(geo::fit_viewport(farm.boundary.as_deref())))
}
