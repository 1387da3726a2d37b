//! Weather report integration tests
//!
//! Covers:
//! - Kelvin to display-Celsius conversion
//! - The 7-day window and its summary statistics
//! - The "total rainfall" figure, which sums probability percentages
//! - Threshold-based recommendations

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use shared::report::weather_report;
use shared::{kelvin_to_celsius, DailyForecast, WeatherData};

fn forecast_day(offset: i64, max_k: f64, min_k: f64, pop: f64, uvi: f64) -> DailyForecast {
    DailyForecast {
        timestamp: Utc.timestamp_opt(1_704_067_200 + offset * 86_400, 0).unwrap(),
        temp_min_kelvin: min_k,
        temp_max_kelvin: max_k,
        temp_day_kelvin: (min_k + max_k) / 2.0,
        precipitation_probability: pop,
        humidity_percent: 70,
        wind_speed_mps: 3.4,
        uv_index: uvi,
        description: "clear sky".to_string(),
    }
}

fn week(max_temps_k: &[f64]) -> WeatherData {
    WeatherData {
        field_id: "1752169888334".to_string(),
        daily: max_temps_k
            .iter()
            .enumerate()
            .map(|(i, &max_k)| forecast_day(i as i64, max_k, max_k - 7.0, 0.2, 6.0))
            .collect(),
    }
}

// ============================================================================
// Unit conversion
// ============================================================================

proptest! {
    /// Displayed temperature is always source Kelvin minus 273.15, rounded
    #[test]
    fn displayed_celsius_is_kelvin_offset(kelvin in 200.0f64..340.0) {
        let day = forecast_day(0, kelvin, kelvin, 0.0, 0.0);
        let expected = (kelvin - 273.15).round() as i32;
        prop_assert_eq!(day.max_celsius(), expected);
        prop_assert_eq!(day.min_celsius(), expected);
    }
}

#[test]
fn kelvin_conversion_reference_points() {
    assert_eq!(kelvin_to_celsius(273.15), 0);
    assert_eq!(kelvin_to_celsius(300.0), 27);
    assert_eq!(kelvin_to_celsius(306.0), 33);
}

// ============================================================================
// The 7-day window
// ============================================================================

#[test]
fn average_temperature_over_seven_days() {
    // Max temps 300..306 K with mins 7 K lower: daily midpoints in Celsius
    // are 23.5, 24.5, ... 29.5, and their mean 26.5 rounds to 27
    let data = week(&[300.0, 301.0, 302.0, 303.0, 304.0, 305.0, 306.0]);
    let report = weather_report(&data);

    assert_eq!(report.daily.len(), 7);
    assert_eq!(report.summary.avg_temp_celsius, 27);
    assert_eq!(report.summary.avg_humidity_percent, 70);
}

#[test]
fn only_first_seven_days_are_reported() {
    let data = week(&[300.0, 301.0, 302.0, 303.0, 304.0, 305.0, 306.0, 320.0]);
    let report = weather_report(&data);
    assert_eq!(report.daily.len(), 7);
    // The eighth, hotter day must not leak into the summary
    assert_eq!(
        report.daily.last().unwrap().max_temp_celsius,
        kelvin_to_celsius(306.0)
    );
}

#[test]
fn daily_rows_are_labelled_in_order() {
    let data = week(&[300.0, 301.0, 302.0]);
    let report = weather_report(&data);
    let labels: Vec<&str> = report.daily.iter().map(|d| d.day.as_str()).collect();
    assert_eq!(labels, vec!["Day 1", "Day 2", "Day 3"]);
}

// ============================================================================
// Total rainfall
// ============================================================================

/// The source system adds up daily rain-probability percentages and labels
/// the sum "total rainfall". The behavior is preserved as-is; this test
/// pins down that the figure is percentage points, not millimetres.
#[test]
fn total_rainfall_sums_probability_percentages_not_millimetres() {
    let mut data = week(&[300.0, 301.0, 302.0, 303.0, 304.0, 305.0, 306.0]);
    for (i, day) in data.daily.iter_mut().enumerate() {
        day.precipitation_probability = 0.1 * (i as f64 + 1.0); // 10%..70%
    }
    let report = weather_report(&data);
    assert_eq!(report.summary.total_rainfall, 10 + 20 + 30 + 40 + 50 + 60 + 70);
}

// ============================================================================
// Recommendations
// ============================================================================

#[test]
fn hot_week_recommends_irrigation_and_shade() {
    // 316.5 K maxima put the weekly average around 40°C
    let data = week(&[316.5; 7]);
    let report = weather_report(&data);
    assert!(report.summary.avg_temp_celsius > 35);
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("increase irrigation and provide shade")));
}

#[test]
fn wet_week_recommends_drainage() {
    let mut data = week(&[300.0; 7]);
    for day in &mut data.daily {
        day.precipitation_probability = 0.9;
    }
    let report = weather_report(&data);
    assert!(report.summary.total_rainfall > 300);
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("ensure proper drainage")));
}

#[test]
fn high_uv_recommends_protection() {
    let data = WeatherData {
        field_id: "1".to_string(),
        daily: (0..7)
            .map(|i| forecast_day(i, 300.0, 293.0, 0.1, if i == 3 { 9.5 } else { 5.0 }))
            .collect(),
    };
    let report = weather_report(&data);
    assert!((report.summary.max_uv_index - 9.5).abs() < 1e-9);
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("High UV levels")));
}

#[test]
fn mild_week_has_no_recommendations() {
    let data = week(&[300.0; 7]);
    let report = weather_report(&data);
    assert!(report.recommendations.is_empty());
}

#[test]
fn empty_forecast_degrades_to_zero_summary() {
    let data = WeatherData {
        field_id: "1".to_string(),
        daily: vec![],
    };
    let report = weather_report(&data);
    assert_eq!(report.summary.avg_temp_celsius, 0);
    assert_eq!(report.summary.total_rainfall, 0);
    assert!(report.recommendations.is_empty());
}
