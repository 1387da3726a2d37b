//! Report generator integration tests
//!
//! Covers the five report kinds:
//! - Type tag always matches the requested kind
//! - Crop-health classification thresholds and monotonicity
//! - Activities completion rate on an empty log
//! - Yield and financial totals and ratios
//! - Download round-trip through pretty-printed JSON

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::BTreeMap;
use uuid::Uuid;

use shared::report::{
    activities_report, classify_overall, crop_health_report, demo_financial_report,
    demo_yield_report, weather_report, yield_report,
};
use shared::{
    Activity, ActivityStatus, CropHealthData, DailyForecast, HealthIndex, IndexStatus,
    OverallHealth, Report, ReportKind, WeatherData, YieldMonth,
};

// ============================================================================
// Helpers
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn crop_health_data(values: &[(HealthIndex, f64)]) -> CropHealthData {
    let observed = date(2024, 6, 11);
    let mut health = BTreeMap::new();
    for &(index, value) in values {
        health.insert(index, BTreeMap::from([(observed, value)]));
    }
    CropHealthData {
        field_id: "1752169888334".to_string(),
        field_area_sq_m: 42000.0,
        crop_code: "APL".to_string(),
        health,
        index_breakdown: BTreeMap::new(),
    }
}

fn forecast_day(offset: i64, max_k: f64, min_k: f64, pop: f64) -> DailyForecast {
    DailyForecast {
        timestamp: Utc.timestamp_opt(1_704_067_200 + offset * 86_400, 0).unwrap(),
        temp_min_kelvin: min_k,
        temp_max_kelvin: max_k,
        temp_day_kelvin: (min_k + max_k) / 2.0,
        precipitation_probability: pop,
        humidity_percent: 70,
        wind_speed_mps: 3.4,
        uv_index: 6.0,
        description: "scattered clouds".to_string(),
    }
}

fn activity(
    activity_type: &str,
    status: ActivityStatus,
    scheduled: NaiveDate,
) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        farm_id: Uuid::new_v4(),
        activity_type: activity_type.to_string(),
        title: format!("{} run", activity_type),
        status,
        scheduled_date: scheduled,
        notes: None,
        created_at: Utc::now(),
    }
}

// ============================================================================
// Type tag
// ============================================================================

#[test]
fn report_type_tag_matches_requested_kind() {
    let health = crop_health_data(&[(HealthIndex::Ndvi, 55.0)]);
    let weather = WeatherData {
        field_id: "1".to_string(),
        daily: vec![forecast_day(0, 300.0, 293.0, 0.2)],
    };

    let reports = [
        Report::CropHealth(crop_health_report(&health)),
        Report::Weather(weather_report(&weather)),
        Report::Activities(activities_report(&[], date(2024, 7, 1))),
        Report::Yield(demo_yield_report()),
        Report::Financial(demo_financial_report()),
    ];

    for (report, kind) in reports.iter().zip(ReportKind::ALL) {
        assert_eq!(report.kind(), kind);
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["type"], kind.as_str());
    }
}

// ============================================================================
// Crop health
// ============================================================================

#[test]
fn mixed_indices_classify_as_good_overall() {
    // mean of 55, 45, 10 is 36.67: above 30, at most 50
    let data = crop_health_data(&[
        (HealthIndex::Ndvi, 55.0),
        (HealthIndex::Evi, 45.0),
        (HealthIndex::Lai, 10.0),
    ]);
    let report = crop_health_report(&data);

    assert_eq!(report.summary.overall_health, OverallHealth::Good);
    assert_eq!(report.summary.critical_issues, vec!["Low LAI".to_string()]);
}

#[test]
fn index_statuses_follow_thresholds() {
    let data = crop_health_data(&[
        (HealthIndex::Ndvi, 51.0),
        (HealthIndex::Evi, 31.0),
        (HealthIndex::Lai, 75.0),
    ]);
    let report = crop_health_report(&data);

    let status_of = |label: &str| {
        report
            .health_indices
            .iter()
            .find(|r| r.index == label)
            .map(|r| r.status)
            .unwrap()
    };
    assert_eq!(status_of("NDVI"), IndexStatus::Good);
    assert_eq!(status_of("EVI"), IndexStatus::Fair);
    // LAI has no calibrated scale regardless of its value
    assert_eq!(status_of("LAI"), IndexStatus::Normal);
}

#[test]
fn low_ndvi_and_ndmi_emit_recommendations() {
    let data = crop_health_data(&[
        (HealthIndex::Ndvi, 25.0),
        (HealthIndex::Ndmi, 15.0),
    ]);
    let report = crop_health_report(&data);

    assert_eq!(
        report.summary.recommendations,
        vec![
            "Increase fertilization to improve vegetation health".to_string(),
            "Increase irrigation frequency due to low moisture content".to_string(),
        ]
    );
}

#[test]
fn healthy_indices_emit_no_recommendations() {
    let data = crop_health_data(&[
        (HealthIndex::Ndvi, 60.0),
        (HealthIndex::Ndmi, 40.0),
    ]);
    let report = crop_health_report(&data);
    assert!(report.summary.recommendations.is_empty());
}

#[test]
fn latest_date_wins_regardless_of_insertion_order() {
    let mut data = crop_health_data(&[(HealthIndex::Ndvi, 55.0)]);
    // An older observation arriving later must not shadow the newest one
    data.health
        .get_mut(&HealthIndex::Ndvi)
        .unwrap()
        .insert(date(2024, 5, 1), 12.0);

    let report = crop_health_report(&data);
    let ndvi = &report.health_indices[0];
    assert!((ndvi.value - 55.0).abs() < 1e-9);
    assert_eq!(report.last_updated, Some(date(2024, 6, 11)));
}

#[test]
fn ndvi_distribution_is_share_of_field_area() {
    let mut data = crop_health_data(&[(HealthIndex::Ndvi, 55.0)]);
    data.index_breakdown.insert(
        date(2024, 6, 11),
        BTreeMap::from([(HealthIndex::Ndvi, vec![4200.0, 8400.0])]),
    );

    let report = crop_health_report(&data);
    assert_eq!(report.ndvi_distribution.len(), 2);
    assert_eq!(report.ndvi_distribution[0].category, "Level 1");
    assert!((report.ndvi_distribution[0].percentage - 10.0).abs() < 1e-9);
    assert!((report.ndvi_distribution[1].percentage - 20.0).abs() < 1e-9);
}

proptest! {
    /// Overall classification never degrades as the mean improves
    #[test]
    fn overall_health_is_monotonic(a in 0.0f64..100.0, b in 0.0f64..100.0) {
        fn rank(h: OverallHealth) -> u8 {
            match h {
                OverallHealth::Poor => 0,
                OverallHealth::Fair => 1,
                OverallHealth::Good => 2,
                OverallHealth::Excellent => 3,
            }
        }
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(classify_overall(lo)) <= rank(classify_overall(hi)));
    }
}

#[test]
fn overall_health_threshold_boundaries() {
    assert_eq!(classify_overall(50.0), OverallHealth::Good);
    assert_eq!(classify_overall(50.1), OverallHealth::Excellent);
    assert_eq!(classify_overall(30.0), OverallHealth::Fair);
    assert_eq!(classify_overall(20.0), OverallHealth::Poor);
}

// ============================================================================
// Activities
// ============================================================================

#[test]
fn empty_activity_log_has_zero_completion_rate() {
    let report = activities_report(&[], date(2024, 7, 1));
    assert_eq!(report.total_activities, 0);
    assert_eq!(report.completion_rate_percent, 0);
    assert_eq!(report.upcoming_activities, 0);
}

#[test]
fn activities_group_and_count() {
    let as_of = date(2024, 7, 1);
    let log = vec![
        activity("irrigation", ActivityStatus::Completed, date(2024, 6, 20)),
        activity("irrigation", ActivityStatus::Pending, date(2024, 7, 5)),
        activity("fertilizer", ActivityStatus::Completed, date(2024, 6, 25)),
        activity("harvesting", ActivityStatus::Pending, date(2024, 6, 30)),
    ];

    let report = activities_report(&log, as_of);
    assert_eq!(report.total_activities, 4);
    assert_eq!(report.completion_rate_percent, 50);
    // Only the pending activity scheduled after as_of counts as upcoming
    assert_eq!(report.upcoming_activities, 1);

    let irrigation = report
        .by_type
        .iter()
        .find(|c| c.label == "Irrigation")
        .unwrap();
    assert_eq!(irrigation.count, 2);

    let completed = report
        .by_status
        .iter()
        .find(|c| c.label == "Completed")
        .unwrap();
    assert_eq!(completed.count, 2);
}

#[test]
fn pending_activity_on_as_of_date_is_not_upcoming() {
    let as_of = date(2024, 7, 1);
    let log = vec![activity("scouting", ActivityStatus::Pending, as_of)];
    let report = activities_report(&log, as_of);
    assert_eq!(report.upcoming_activities, 0);
}

// ============================================================================
// Yield
// ============================================================================

#[test]
fn yield_totals_and_accuracy() {
    let report = demo_yield_report();
    assert_eq!(report.total_estimated_kg, 8700);
    assert_eq!(report.total_actual_kg, 6920);
    // 6920 / 8700 = 79.54%, rounded
    assert_eq!(report.accuracy_percent, 80);
}

#[test]
fn yield_accuracy_is_zero_without_actuals() {
    let monthly = vec![YieldMonth {
        month: "Jan".to_string(),
        estimated_kg: 1200,
        actual_kg: 0,
    }];
    let report = yield_report(monthly, "1,200 kg/acre", "October 2024");
    assert_eq!(report.accuracy_percent, 0);
}

// ============================================================================
// Financial
// ============================================================================

#[test]
fn financial_totals_and_ratios() {
    use rust_decimal::Decimal;

    let report = demo_financial_report();
    assert_eq!(report.total_income, Decimal::from(108_000));
    assert_eq!(report.total_expenses, Decimal::from(50_000));
    assert_eq!(report.profit, Decimal::from(58_000));
    // 58000 / 108000 = 53.7%, 58000 / 50000 = 116%
    assert_eq!(report.profit_margin_percent, 54);
    assert_eq!(report.roi_percent, 116);
}

// ============================================================================
// Download round-trip
// ============================================================================

#[test]
fn download_round_trips_to_deep_equal_report() {
    let data = crop_health_data(&[
        (HealthIndex::Ndvi, 55.0),
        (HealthIndex::Evi, 45.0),
        (HealthIndex::Lai, 10.0),
    ]);
    let report = Report::CropHealth(crop_health_report(&data));

    let body = serde_json::to_string_pretty(&report).unwrap();
    let parsed: Report = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn download_file_name_matches_kind_and_date() {
    let as_of = date(2024, 7, 9);
    for kind in ReportKind::ALL {
        let name = kind.download_file_name(as_of);
        assert_eq!(name, format!("{}-report-2024-07-09.json", kind.as_str()));
    }
}
