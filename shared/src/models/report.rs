//! Report models: the tagged union over report kinds and the chart-ready
//! row types each kind carries.
//!
//! Reports are derived data. They are regenerated in full on every farm,
//! kind, or date-range change and never persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which aggregation the report generator runs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    CropHealth,
    Weather,
    Activities,
    Yield,
    Financial,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::CropHealth,
        ReportKind::Weather,
        ReportKind::Activities,
        ReportKind::Yield,
        ReportKind::Financial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::CropHealth => "crop-health",
            ReportKind::Weather => "weather",
            ReportKind::Activities => "activities",
            ReportKind::Yield => "yield",
            ReportKind::Financial => "financial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "crop-health" => Some(ReportKind::CropHealth),
            "weather" => Some(ReportKind::Weather),
            "activities" => Some(ReportKind::Activities),
            "yield" => Some(ReportKind::Yield),
            "financial" => Some(ReportKind::Financial),
            _ => None,
        }
    }

    /// File name for a client-side download of this report
    pub fn download_file_name(&self, date: NaiveDate) -> String {
        format!("{}-report-{}.json", self.as_str(), date.format("%Y-%m-%d"))
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Crop health
// ============================================================================

/// Per-index classification against fixed thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IndexStatus {
    Good,
    Fair,
    Poor,
    /// Indices without a calibrated threshold scale
    Normal,
}

/// Overall field classification from the mean index value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OverallHealth {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl std::fmt::Display for OverallHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OverallHealth::Excellent => "Excellent",
            OverallHealth::Good => "Good",
            OverallHealth::Fair => "Fair",
            OverallHealth::Poor => "Poor",
        };
        f.write_str(s)
    }
}

/// Latest reading of one health index, chart row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexReading {
    /// Uppercase index label, e.g. "NDVI"
    pub index: String,
    pub value: f64,
    pub status: IndexStatus,
}

/// One NDVI category bucket of the distribution chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionBucket {
    /// "Level 1", "Level 2", ...
    pub category: String,
    pub value: f64,
    /// Share of the field area, percent with one decimal
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropHealthSummary {
    pub overall_health: OverallHealth,
    /// "Low NDVI"-style flags for indices below the critical threshold
    pub critical_issues: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropHealthReport {
    pub health_indices: Vec<IndexReading>,
    pub ndvi_distribution: Vec<DistributionBucket>,
    pub field_area_sq_m: f64,
    pub crop_code: String,
    pub last_updated: Option<NaiveDate>,
    pub summary: CropHealthSummary,
}

// ============================================================================
// Weather
// ============================================================================

/// One chart row of the 7-day trend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherDay {
    /// "Day 1", "Day 2", ...
    pub day: String,
    pub date: NaiveDate,
    pub max_temp_celsius: i32,
    pub min_temp_celsius: i32,
    pub humidity_percent: i32,
    /// Rain probability, integer percent
    pub rainfall_percent: i32,
    pub wind_speed_mps: i32,
    pub uv_index: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSummary {
    pub avg_temp_celsius: i32,
    /// Sum of the daily rain-probability percentages across the window.
    /// Percentage points, not millimetres.
    pub total_rainfall: i32,
    pub avg_humidity_percent: i32,
    pub max_uv_index: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub daily: Vec<WeatherDay>,
    pub summary: WeatherSummary,
    pub recommendations: Vec<String>,
}

// ============================================================================
// Activities
// ============================================================================

/// A labelled count, used for both by-type and by-status charts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelledCount {
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivitiesReport {
    pub total_activities: u32,
    pub by_type: Vec<LabelledCount>,
    pub by_status: Vec<LabelledCount>,
    /// completed / total, rounded percent; 0 for an empty log
    pub completion_rate_percent: u32,
    /// Pending activities scheduled strictly after the reference date
    pub upcoming_activities: u32,
}

// ============================================================================
// Yield
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YieldMonth {
    pub month: String,
    pub estimated_kg: u32,
    pub actual_kg: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YieldReport {
    pub monthly: Vec<YieldMonth>,
    pub total_estimated_kg: u32,
    pub total_actual_kg: u32,
    /// actual / estimated, rounded percent; 0 while no actuals exist
    pub accuracy_percent: u32,
    pub projected_harvest: String,
    pub harvest_window: String,
}

// ============================================================================
// Financial
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseCategory {
    pub category: String,
    pub amount: Decimal,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyCashFlow {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinancialReport {
    pub expenses: Vec<ExpenseCategory>,
    pub revenue: Vec<MonthlyCashFlow>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub profit: Decimal,
    pub profit_margin_percent: i32,
    pub roi_percent: i32,
}

// ============================================================================
// The union
// ============================================================================

/// A generated report, tagged by kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Report {
    #[serde(rename = "crop-health")]
    CropHealth(CropHealthReport),
    #[serde(rename = "weather")]
    Weather(WeatherReport),
    #[serde(rename = "activities")]
    Activities(ActivitiesReport),
    #[serde(rename = "yield")]
    Yield(YieldReport),
    #[serde(rename = "financial")]
    Financial(FinancialReport),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::CropHealth(_) => ReportKind::CropHealth,
            Report::Weather(_) => ReportKind::Weather,
            Report::Activities(_) => ReportKind::Activities,
            Report::Yield(_) => ReportKind::Yield,
            Report::Financial(_) => ReportKind::Financial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_kind_round_trips_through_strings() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ReportKind::parse("unknown"), None);
    }

    #[test]
    fn report_serializes_with_type_tag() {
        let report = Report::Activities(ActivitiesReport {
            total_activities: 0,
            by_type: vec![],
            by_status: vec![],
            completion_rate_percent: 0,
            upcoming_activities: 0,
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["type"], "activities");
    }

    #[test]
    fn download_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        assert_eq!(
            ReportKind::CropHealth.download_file_name(date),
            "crop-health-report-2024-07-09.json"
        );
    }
}
