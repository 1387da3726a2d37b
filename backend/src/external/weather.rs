//! Weather API client
//!
//! Fetches the daily forecast for a field from the weather provider. The
//! provider reports temperatures in Kelvin and precipitation probability in
//! [0, 1]; both are passed through unchanged and converted at display time.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::{DailyForecast, WeatherData};

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Provider response for a field forecast
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    dt: i64,
    temp: ForecastTemp,
    pop: f64,
    humidity: i32,
    wind_speed: f64,
    #[serde(default)]
    uvi: f64,
    weather: Vec<ForecastCondition>,
}

#[derive(Debug, Deserialize)]
struct ForecastTemp {
    min: f64,
    max: f64,
    day: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastCondition {
    description: String,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch the daily forecast for a field
    pub async fn get_forecast(&self, field_id: &str) -> AppResult<WeatherData> {
        let url = format!(
            "{}/forecast/{}?appid={}",
            self.base_url, field_id, self.api_key
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!("Weather API request failed: {}", e);
            AppError::WeatherServiceUnavailable
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API error: {} - {}", status, body);
            return Err(AppError::WeatherServiceUnavailable);
        }

        let data: ForecastResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse forecast response: {}", e))
        })?;

        Ok(convert_forecast(field_id, data))
    }
}

/// Convert the provider payload to our format
fn convert_forecast(field_id: &str, data: ForecastResponse) -> WeatherData {
    let daily = data
        .daily
        .into_iter()
        .map(|day| DailyForecast {
            timestamp: DateTime::from_timestamp(day.dt, 0).unwrap_or_else(Utc::now),
            temp_min_kelvin: day.temp.min,
            temp_max_kelvin: day.temp.max,
            temp_day_kelvin: day.temp.day,
            precipitation_probability: day.pop,
            humidity_percent: day.humidity,
            wind_speed_mps: day.wind_speed,
            uv_index: day.uvi,
            description: day
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_default(),
        })
        .collect();

    WeatherData {
        field_id: field_id.to_string(),
        daily,
    }
}
