//! Report HTTP handlers
//!
//! One endpoint serves all five report kinds. `format=csv` exports the
//! report's main tabular series; `download=true` returns the pretty-printed
//! JSON document with the attachment file name the dashboard's download
//! button uses.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use shared::{DateRange, ReportKind};

use crate::error::{AppError, AppResult};
use crate::services::{FarmService, ReportService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// "json" (default) or "csv"
    pub format: Option<String>,
    /// Return an attachment download instead of an inline body
    pub download: Option<bool>,
    /// Reference date for time-dependent aggregations; defaults to today
    pub as_of: Option<NaiveDate>,
    /// Restrict the activities report to this range (both bounds required)
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Generate a report for a farm
pub async fn get_report(
    State(state): State<AppState>,
    Path((farm_id, report_type)): Path<(Uuid, String)>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let kind = ReportKind::parse(&report_type)
        .ok_or_else(|| AppError::Validation(format!("Unknown report type: {}", report_type)))?;

    let farm = FarmService::new(state.db.clone()).get(farm_id).await?;

    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let range = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) if start <= end => Some(DateRange { start, end }),
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "start_date must not be after end_date".to_string(),
            ))
        }
        _ => None,
    };

    let service = ReportService::new(
        state.db.clone(),
        state.weather_client(),
        state.crop_health_client(),
    );
    let report = service.generate(&farm, kind, as_of, range).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportService::to_csv(&report)?;
        let disposition = format!(
            "attachment; filename=\"{}-report-{}.csv\"",
            kind.as_str(),
            as_of.format("%Y-%m-%d")
        );
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response());
    }

    if query.download.unwrap_or(false) {
        let body = ReportService::download_body(&report)?;
        let disposition = format!(
            "attachment; filename=\"{}\"",
            kind.download_file_name(as_of)
        );
        return Ok((
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            body,
        )
            .into_response());
    }

    Ok(Json(report).into_response())
}
