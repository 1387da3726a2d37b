//! WebAssembly module for the AgriDash platform
//!
//! Provides client-side computation for:
//! - Report generation (the dashboard generates reports in the browser)
//! - Map viewport fitting
//! - Display unit conversions

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::geo::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_err(context: &str) -> impl Fn(serde_json::Error) -> JsValue + '_ {
    move |e| JsValue::from_str(&format!("Invalid {} JSON: {}", context, e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Generate the crop-health report from provider data
#[wasm_bindgen]
pub fn generate_crop_health_report(crop_health_json: &str) -> Result<String, JsValue> {
    let data: CropHealthData =
        serde_json::from_str(crop_health_json).map_err(parse_err("crop health"))?;
    let report = Report::CropHealth(shared::report::crop_health_report(&data));
    to_json(&report)
}

/// Generate the weather report from the forecast
#[wasm_bindgen]
pub fn generate_weather_report(weather_json: &str) -> Result<String, JsValue> {
    let data: WeatherData = serde_json::from_str(weather_json).map_err(parse_err("weather"))?;
    let report = Report::Weather(shared::report::weather_report(&data));
    to_json(&report)
}

/// Generate the activities report from the farm's activity log.
/// `as_of` is an ISO date anchoring the "upcoming" count.
#[wasm_bindgen]
pub fn generate_activities_report(activities_json: &str, as_of: &str) -> Result<String, JsValue> {
    let activities: Vec<Activity> =
        serde_json::from_str(activities_json).map_err(parse_err("activities"))?;
    let as_of: NaiveDate = as_of
        .parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid as_of date: {}", e)))?;
    let report = Report::Activities(shared::report::activities_report(&activities, as_of));
    to_json(&report)
}

/// Generate the demo yield report
#[wasm_bindgen]
pub fn generate_yield_report() -> Result<String, JsValue> {
    to_json(&Report::Yield(shared::report::demo_yield_report()))
}

/// Generate the demo financial report
#[wasm_bindgen]
pub fn generate_financial_report() -> Result<String, JsValue> {
    to_json(&Report::Financial(shared::report::demo_financial_report()))
}

/// Fit a map viewport to a farm boundary (`[[lng, lat], ...]`).
/// Boundaries with fewer than 3 points yield the placeholder view.
#[wasm_bindgen]
pub fn fit_farm_viewport(boundary_json: &str) -> Result<String, JsValue> {
    let boundary: Option<Vec<BoundaryPoint>> =
        serde_json::from_str(boundary_json).map_err(parse_err("boundary"))?;
    to_json(&fit_viewport(boundary.as_deref()))
}

/// Convert a provider Kelvin temperature to display Celsius
#[wasm_bindgen]
pub fn kelvin_to_celsius_display(kelvin: f64) -> i32 {
    kelvin_to_celsius(kelvin)
}

/// Normalize a precipitation probability in [0, 1] to an integer percent
#[wasm_bindgen]
pub fn rain_probability_percent(probability: f64) -> i32 {
    probability_to_percent(probability)
}

/// File name for a report download, e.g. "weather-report-2024-07-09.json"
#[wasm_bindgen]
pub fn report_download_file_name(report_type: &str, iso_date: &str) -> Result<String, JsValue> {
    let kind = ReportKind::parse(report_type)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown report type: {}", report_type)))?;
    let date: NaiveDate = iso_date
        .parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date: {}", e)))?;
    Ok(kind.download_file_name(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kelvin_conversion() {
        assert_eq!(kelvin_to_celsius_display(300.0), 27);
        assert_eq!(kelvin_to_celsius_display(273.15), 0);
    }

    #[test]
    fn test_rain_probability() {
        assert_eq!(rain_probability_percent(0.85), 85);
        assert_eq!(rain_probability_percent(0.0), 0);
    }

    #[test]
    fn test_viewport_placeholder_for_short_boundary() {
        let view = fit_farm_viewport("[[77.0, 12.0], [77.1, 12.1]]").unwrap();
        assert!(view.contains("placeholder"));
    }

    #[test]
    fn test_yield_report_tag() {
        let json = generate_yield_report().unwrap();
        assert!(json.contains("\"type\":\"yield\""));
    }

    #[test]
    fn test_download_file_name() {
        let name = report_download_file_name("financial", "2024-07-09").unwrap();
        assert_eq!(name, "financial-report-2024-07-09.json");
    }
}
