//! The report generator
//!
//! One pure function per report kind. Every function is deterministic in its
//! inputs — time-dependent reports take the reference date as a parameter —
//! and carries no state between kinds. Callers regenerate the full report on
//! every farm, kind, or date-range change.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{
    ActivitiesReport, Activity, ActivityStatus, CropHealthData, CropHealthReport,
    CropHealthSummary, DistributionBucket, ExpenseCategory, FinancialReport, HealthIndex,
    IndexReading, IndexStatus, LabelledCount, MonthlyCashFlow, OverallHealth, WeatherData,
    WeatherDay, WeatherReport, WeatherSummary, YieldMonth, YieldReport,
};

/// Index value below which an index is flagged as a critical issue
pub const CRITICAL_INDEX_THRESHOLD: f64 = 20.0;

/// Forecast days included in the weather report
pub const WEATHER_REPORT_DAYS: usize = 7;

// ============================================================================
// Classification
// ============================================================================

/// Classify a single index reading.
///
/// Only NDVI and EVI have a calibrated Good/Fair/Poor scale; the remaining
/// indices report as Normal.
pub fn classify_index(index: HealthIndex, value: f64) -> IndexStatus {
    match index {
        HealthIndex::Ndvi | HealthIndex::Evi => {
            if value > 50.0 {
                IndexStatus::Good
            } else if value > 30.0 {
                IndexStatus::Fair
            } else {
                IndexStatus::Poor
            }
        }
        _ => IndexStatus::Normal,
    }
}

/// Classify overall field health from the mean of the latest index values.
pub fn classify_overall(mean_value: f64) -> OverallHealth {
    if mean_value > 50.0 {
        OverallHealth::Excellent
    } else if mean_value > 30.0 {
        OverallHealth::Good
    } else if mean_value > 20.0 {
        OverallHealth::Fair
    } else {
        OverallHealth::Poor
    }
}

// ============================================================================
// Crop health
// ============================================================================

/// Build the crop-health report from provider data.
pub fn crop_health_report(data: &CropHealthData) -> CropHealthReport {
    let health_indices: Vec<IndexReading> = HealthIndex::ALL
        .iter()
        .filter_map(|&index| {
            data.latest_value(index).map(|(_, value)| IndexReading {
                index: index.label(),
                value,
                status: classify_index(index, value),
            })
        })
        .collect();

    let overall_health = if health_indices.is_empty() {
        OverallHealth::Poor
    } else {
        let mean =
            health_indices.iter().map(|r| r.value).sum::<f64>() / health_indices.len() as f64;
        classify_overall(mean)
    };

    let critical_issues: Vec<String> = health_indices
        .iter()
        .filter(|r| r.value < CRITICAL_INDEX_THRESHOLD)
        .map(|r| format!("Low {}", r.index))
        .collect();

    let mut recommendations = Vec::new();
    if let Some((_, ndvi)) = data.latest_value(HealthIndex::Ndvi) {
        if ndvi < 30.0 {
            recommendations
                .push("Increase fertilization to improve vegetation health".to_string());
        }
    }
    if let Some((_, ndmi)) = data.latest_value(HealthIndex::Ndmi) {
        if ndmi < 20.0 {
            recommendations
                .push("Increase irrigation frequency due to low moisture content".to_string());
        }
    }

    let ndvi_distribution = data
        .latest_breakdown(HealthIndex::Ndvi)
        .map(|(_, counts)| {
            counts
                .iter()
                .enumerate()
                .map(|(i, &value)| DistributionBucket {
                    category: format!("Level {}", i + 1),
                    value,
                    percentage: if data.field_area_sq_m > 0.0 {
                        (value / data.field_area_sq_m * 1000.0).round() / 10.0
                    } else {
                        0.0
                    },
                })
                .collect()
        })
        .unwrap_or_default();

    let last_updated = data
        .latest_date()
        .or_else(|| data.index_breakdown.keys().next_back().copied());

    CropHealthReport {
        health_indices,
        ndvi_distribution,
        field_area_sq_m: data.field_area_sq_m,
        crop_code: data.crop_code.clone(),
        last_updated,
        summary: CropHealthSummary {
            overall_health,
            critical_issues,
            recommendations,
        },
    }
}

// ============================================================================
// Weather
// ============================================================================

/// Build the weather report from the first seven forecast days.
pub fn weather_report(data: &WeatherData) -> WeatherReport {
    let daily: Vec<WeatherDay> = data
        .daily
        .iter()
        .take(WEATHER_REPORT_DAYS)
        .enumerate()
        .map(|(i, day)| WeatherDay {
            day: format!("Day {}", i + 1),
            date: day.date(),
            max_temp_celsius: day.max_celsius(),
            min_temp_celsius: day.min_celsius(),
            humidity_percent: day.humidity_percent,
            rainfall_percent: day.rain_percent(),
            wind_speed_mps: day.wind_speed_mps.round() as i32,
            uv_index: day.uv_index,
        })
        .collect();

    let summary = if daily.is_empty() {
        WeatherSummary {
            avg_temp_celsius: 0,
            total_rainfall: 0,
            avg_humidity_percent: 0,
            max_uv_index: 0.0,
        }
    } else {
        let n = daily.len() as f64;
        let avg_temp = daily
            .iter()
            .map(|d| (d.max_temp_celsius + d.min_temp_celsius) as f64 / 2.0)
            .sum::<f64>()
            / n;
        let avg_humidity = daily.iter().map(|d| d.humidity_percent as f64).sum::<f64>() / n;
        WeatherSummary {
            avg_temp_celsius: avg_temp.round() as i32,
            // Carried over as-is from the source system: this adds up
            // probability percentages, not millimetres of rain.
            total_rainfall: daily.iter().map(|d| d.rainfall_percent).sum(),
            avg_humidity_percent: avg_humidity.round() as i32,
            max_uv_index: daily.iter().map(|d| d.uv_index).fold(f64::MIN, f64::max),
        }
    };

    let mut recommendations = Vec::new();
    if !daily.is_empty() {
        if summary.avg_temp_celsius > 35 {
            recommendations.push(
                "High temperatures detected - increase irrigation and provide shade".to_string(),
            );
        }
        if summary.total_rainfall > 300 {
            recommendations.push("High rainfall expected - ensure proper drainage".to_string());
        }
        if summary.max_uv_index > 8.0 {
            recommendations
                .push("High UV levels - protect workers and monitor crop stress".to_string());
        }
    }

    WeatherReport {
        daily,
        summary,
        recommendations,
    }
}

// ============================================================================
// Activities
// ============================================================================

fn label_for(raw: &str) -> String {
    let cleaned = raw.replace('_', " ");
    let mut chars = cleaned.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => cleaned,
    }
}

fn count_by<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<LabelledCount> {
    let mut counts: Vec<LabelledCount> = Vec::new();
    for raw in labels {
        let label = label_for(raw);
        match counts.iter_mut().find(|c| c.label == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(LabelledCount { label, count: 1 }),
        }
    }
    counts
}

/// Build the activities report from the farm's activity log.
///
/// `as_of` is the reference date for "upcoming": pending activities
/// scheduled strictly after it. An empty log reports a completion rate of
/// zero rather than dividing by zero.
pub fn activities_report(activities: &[Activity], as_of: NaiveDate) -> ActivitiesReport {
    let total = activities.len() as u32;

    let by_type = count_by(activities.iter().map(|a| a.activity_type.as_str()));
    let by_status = count_by(activities.iter().map(|a| a.status.as_str()));

    let completed = activities
        .iter()
        .filter(|a| a.status == ActivityStatus::Completed)
        .count() as f64;
    let completion_rate_percent = if total == 0 {
        0
    } else {
        (completed / total as f64 * 100.0).round() as u32
    };

    let upcoming_activities = activities
        .iter()
        .filter(|a| a.status == ActivityStatus::Pending && a.scheduled_date > as_of)
        .count() as u32;

    ActivitiesReport {
        total_activities: total,
        by_type,
        by_status,
        completion_rate_percent,
        upcoming_activities,
    }
}

// ============================================================================
// Yield
// ============================================================================

/// Build the yield report from an estimated-vs-actual monthly series.
///
/// Accuracy is actual over estimated as a rounded percent, defined as zero
/// until any actuals have been recorded.
pub fn yield_report(
    monthly: Vec<YieldMonth>,
    projected_harvest: impl Into<String>,
    harvest_window: impl Into<String>,
) -> YieldReport {
    let total_estimated_kg: u32 = monthly.iter().map(|m| m.estimated_kg).sum();
    let total_actual_kg: u32 = monthly.iter().map(|m| m.actual_kg).sum();

    let accuracy_percent = if total_actual_kg > 0 && total_estimated_kg > 0 {
        (total_actual_kg as f64 / total_estimated_kg as f64 * 100.0).round() as u32
    } else {
        0
    };

    YieldReport {
        monthly,
        total_estimated_kg,
        total_actual_kg,
        accuracy_percent,
        projected_harvest: projected_harvest.into(),
        harvest_window: harvest_window.into(),
    }
}

/// Demo estimated-vs-actual series. Months with no recorded harvest yet
/// carry zero actuals.
pub fn demo_yield_series() -> Vec<YieldMonth> {
    [
        ("Jan", 1200, 1150),
        ("Feb", 1300, 1280),
        ("Mar", 1400, 1420),
        ("Apr", 1500, 1480),
        ("May", 1600, 1590),
        ("Jun", 1700, 0),
    ]
    .into_iter()
    .map(|(month, estimated_kg, actual_kg)| YieldMonth {
        month: month.to_string(),
        estimated_kg,
        actual_kg,
    })
    .collect()
}

/// Demo yield report as shipped to fields without harvest records.
pub fn demo_yield_report() -> YieldReport {
    yield_report(demo_yield_series(), "1,700 kg/acre", "October 2024")
}

// ============================================================================
// Financial
// ============================================================================

fn percent_of(part: Decimal, whole: Decimal) -> i32 {
    if whole.is_zero() {
        return 0;
    }
    (part / whole * Decimal::from(100))
        .round()
        .to_i32()
        .unwrap_or(0)
}

/// Build the financial report from expense categories and a monthly
/// income/expense series.
pub fn financial_report(
    expenses: Vec<ExpenseCategory>,
    revenue: Vec<MonthlyCashFlow>,
) -> FinancialReport {
    let total_income: Decimal = revenue.iter().map(|m| m.income).sum();
    let total_expenses: Decimal = revenue.iter().map(|m| m.expenses).sum();
    let profit = total_income - total_expenses;

    FinancialReport {
        profit_margin_percent: percent_of(profit, total_income),
        roi_percent: percent_of(profit, total_expenses),
        expenses,
        revenue,
        total_income,
        total_expenses,
        profit,
    }
}

/// Demo expense breakdown by category.
pub fn demo_expense_categories() -> Vec<ExpenseCategory> {
    [
        ("Seeds", 5000, 20),
        ("Fertilizers", 8000, 32),
        ("Pesticides", 3000, 12),
        ("Labor", 6000, 24),
        ("Equipment", 3000, 12),
    ]
    .into_iter()
    .map(|(category, amount, percentage)| ExpenseCategory {
        category: category.to_string(),
        amount: Decimal::from(amount),
        percentage,
    })
    .collect()
}

/// Demo monthly income/expense series.
pub fn demo_cash_flow() -> Vec<MonthlyCashFlow> {
    [
        ("Jan", 15000, 8000),
        ("Feb", 18000, 9000),
        ("Mar", 22000, 10000),
        ("Apr", 25000, 11000),
        ("May", 28000, 12000),
    ]
    .into_iter()
    .map(|(month, income, expenses)| MonthlyCashFlow {
        month: month.to_string(),
        income: Decimal::from(income),
        expenses: Decimal::from(expenses),
    })
    .collect()
}

/// Demo financial report as shipped to fields without bookkeeping records.
pub fn demo_financial_report() -> FinancialReport {
    financial_report(demo_expense_categories(), demo_cash_flow())
}
