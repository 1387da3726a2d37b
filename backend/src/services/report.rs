//! Report service: fetches the inputs a report kind needs, runs the
//! generator, and packages the result for JSON download or CSV export.
//!
//! Reports are regenerated in full on every request; nothing is cached or
//! persisted between kinds.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;

use shared::report as generator;
use shared::{DateRange, Farm, Report, ReportKind};

use crate::error::{AppError, AppResult};
use crate::external::{CropHealthClient, WeatherClient};
use crate::services::activity::ActivityService;

/// Report service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
    weather: WeatherClient,
    crop_health: CropHealthClient,
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(db: PgPool, weather: WeatherClient, crop_health: CropHealthClient) -> Self {
        Self {
            db,
            weather,
            crop_health,
        }
    }

    /// Generate a report for a farm.
    ///
    /// `as_of` anchors time-dependent aggregations (upcoming activities,
    /// download file names) so a report is reproducible for a given date.
    /// `range`, when set, restricts the activities report to activities
    /// scheduled inside it; provider-backed reports always reflect the
    /// providers' current data.
    pub async fn generate(
        &self,
        farm: &Farm,
        kind: ReportKind,
        as_of: NaiveDate,
        range: Option<DateRange>,
    ) -> AppResult<Report> {
        let report = match kind {
            ReportKind::CropHealth => {
                let data = self.crop_health.get_farmer_data(&farm.field_id).await?;
                Report::CropHealth(generator::crop_health_report(&data))
            }
            ReportKind::Weather => {
                let data = self.weather.get_forecast(&farm.field_id).await?;
                Report::Weather(generator::weather_report(&data))
            }
            ReportKind::Activities => {
                let mut activities = ActivityService::new(self.db.clone())
                    .list_for_farm(farm.id)
                    .await?;
                if let Some(range) = range {
                    activities.retain(|a| {
                        a.scheduled_date >= range.start && a.scheduled_date <= range.end
                    });
                }
                Report::Activities(generator::activities_report(&activities, as_of))
            }
            ReportKind::Yield => Report::Yield(generator::demo_yield_report()),
            ReportKind::Financial => Report::Financial(generator::demo_financial_report()),
        };

        Ok(report)
    }

    /// Pretty-printed JSON body for the download action
    pub fn download_body(report: &Report) -> AppResult<String> {
        serde_json::to_string_pretty(report)
            .map_err(|e| AppError::Internal(format!("Report serialization error: {}", e)))
    }

    /// Export report rows as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                AppError::Internal(format!("CSV serialization error: {}", e))
            })?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }

    /// CSV rendering of a report's main tabular series
    pub fn to_csv(report: &Report) -> AppResult<String> {
        match report {
            Report::CropHealth(r) => Self::export_to_csv(&r.health_indices),
            Report::Weather(r) => Self::export_to_csv(&r.daily),
            Report::Activities(r) => Self::export_to_csv(&r.by_type),
            Report::Yield(r) => Self::export_to_csv(&r.monthly),
            Report::Financial(r) => Self::export_to_csv(&r.revenue),
        }
    }
}
