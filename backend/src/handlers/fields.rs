//! Field-scoped HTTP handlers: weather, crop health, the combined
//! snapshot, and advisories
//!
//! Everything here is keyed by the provider field id, and every payload
//! carries that id so clients can match responses to the current selection.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use shared::{CropHealthData, FieldAdvisory, FieldSnapshot, IrrigationDay, WeatherData};

use crate::error::{AppError, AppResult};
use crate::services::{AdvisoryService, DashboardService};
use crate::AppState;

fn checked_field_id(field_id: &str) -> AppResult<&str> {
    shared::validate_field_id(field_id).map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(field_id)
}

/// Fetch the forecast for a field
pub async fn get_field_weather(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
) -> AppResult<Json<WeatherData>> {
    let field_id = checked_field_id(&field_id)?;
    let weather = state.weather_client().get_forecast(field_id).await?;
    Ok(Json(weather))
}

/// Fetch crop-health data for a field
pub async fn get_field_crop_health(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
) -> AppResult<Json<CropHealthData>> {
    let field_id = checked_field_id(&field_id)?;
    let data = state.crop_health_client().get_farmer_data(field_id).await?;
    Ok(Json(data))
}

/// Combined dashboard snapshot: weather and crop-health fetched in
/// parallel, each degrading to `null` on provider failure
pub async fn get_field_snapshot(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
) -> AppResult<Json<FieldSnapshot>> {
    let field_id = checked_field_id(&field_id)?;
    let service = DashboardService::new(state.weather_client(), state.crop_health_client());
    let snapshot = service.field_snapshot(field_id).await?;
    Ok(Json(snapshot))
}

/// Get the advisory document for a field
pub async fn get_field_advisory(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
) -> AppResult<Json<FieldAdvisory>> {
    let field_id = checked_field_id(&field_id)?;
    let service = AdvisoryService::new(state.db.clone());
    let advisory = service.get_for_field(field_id).await?;
    Ok(Json(advisory))
}

/// Query parameters for the irrigation calendar
#[derive(Debug, Deserialize)]
pub struct IrrigationQuery {
    /// Overlay the live forecast onto the schedule (default true)
    pub with_forecast: Option<bool>,
}

/// Irrigation schedule, optionally overlaid with the live forecast.
/// A weather failure keeps the planned schedule rather than erroring.
pub async fn get_irrigation_calendar(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
    Query(query): Query<IrrigationQuery>,
) -> AppResult<Json<Vec<IrrigationDay>>> {
    let field_id = checked_field_id(&field_id)?;
    let weather = if query.with_forecast.unwrap_or(true) {
        state.weather_client().get_forecast(field_id).await.ok()
    } else {
        None
    };

    let service = AdvisoryService::new(state.db.clone());
    let calendar = service
        .irrigation_calendar(field_id, weather.as_ref())
        .await?;
    Ok(Json(calendar))
}
