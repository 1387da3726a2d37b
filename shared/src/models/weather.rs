//! Weather data models
//!
//! Forecast temperatures are kept in Kelvin, the raw unit of the weather
//! provider. Conversion to display Celsius happens in exactly one place so
//! the rounding rule cannot drift between views.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Convert a provider temperature to display Celsius, rounded to the
/// nearest integer.
pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
    (kelvin - 273.15).round() as i32
}

/// Normalize a precipitation probability in [0, 1] to an integer percent.
pub fn probability_to_percent(probability: f64) -> i32 {
    (probability * 100.0).round() as i32
}

/// One day of forecast, as fetched from the weather provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub timestamp: DateTime<Utc>,
    pub temp_min_kelvin: f64,
    pub temp_max_kelvin: f64,
    pub temp_day_kelvin: f64,
    /// Probability of precipitation in [0, 1]
    pub precipitation_probability: f64,
    pub humidity_percent: i32,
    pub wind_speed_mps: f64,
    pub uv_index: f64,
    pub description: String,
}

impl DailyForecast {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn min_celsius(&self) -> i32 {
        kelvin_to_celsius(self.temp_min_kelvin)
    }

    pub fn max_celsius(&self) -> i32 {
        kelvin_to_celsius(self.temp_max_kelvin)
    }

    pub fn day_celsius(&self) -> i32 {
        kelvin_to_celsius(self.temp_day_kelvin)
    }

    pub fn rain_percent(&self) -> i32 {
        probability_to_percent(self.precipitation_probability)
    }
}

/// Daily forecast series for a field
///
/// Immutable snapshot fetched per field; never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherData {
    pub field_id: String,
    pub daily: Vec<DailyForecast>,
}
