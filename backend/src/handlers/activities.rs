//! Activity log HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::{Activity, ActivityStatus};

use crate::error::AppResult;
use crate::services::activity::{ActivityService, CreateActivityInput};
use crate::AppState;

/// List a farm's activity log
pub async fn list_activities(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
) -> AppResult<Json<Vec<Activity>>> {
    let service = ActivityService::new(state.db.clone());
    let activities = service.list_for_farm(farm_id).await?;
    Ok(Json(activities))
}

/// Log a new activity
pub async fn create_activity(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
    Json(input): Json<CreateActivityInput>,
) -> AppResult<impl IntoResponse> {
    let service = ActivityService::new(state.db.clone());
    let activity = service.create(farm_id, input).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// Input for a status update
#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub status: ActivityStatus,
}

/// Update an activity's status
pub async fn update_activity_status(
    State(state): State<AppState>,
    Path((farm_id, activity_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateStatusInput>,
) -> AppResult<Json<Activity>> {
    let service = ActivityService::new(state.db.clone());
    let activity = service.set_status(farm_id, activity_id, input.status).await?;
    Ok(Json(activity))
}
