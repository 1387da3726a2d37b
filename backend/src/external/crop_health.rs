//! Crop-health ("farmer data") API client
//!
//! The provider reports per-index health series and index breakdowns keyed
//! by date strings, with numeric values encoded as strings. Conversion
//! parses everything into typed maps; entries that fail to parse are
//! dropped with a warning rather than failing the whole payload.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use shared::{CropHealthData, HealthIndex};

use crate::error::{AppError, AppResult};

/// Crop-health API client
#[derive(Clone)]
pub struct CropHealthClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Provider response for a field
#[derive(Debug, Deserialize)]
struct FarmerDataResponse {
    #[serde(rename = "FieldArea")]
    field_area: f64,
    #[serde(rename = "CropCode")]
    crop_code: String,
    /// index name -> date string -> value string
    #[serde(rename = "Health", default)]
    health: HashMap<String, HashMap<String, String>>,
    /// date string -> index name -> category-count strings
    #[serde(rename = "IndexBreakdown", default)]
    index_breakdown: HashMap<String, HashMap<String, Vec<String>>>,
}

impl CropHealthClient {
    /// Create a new CropHealthClient
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch crop-health data for a field
    pub async fn get_farmer_data(&self, field_id: &str) -> AppResult<CropHealthData> {
        let url = format!("{}/field/{}/health", self.base_url, field_id);

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Crop-health API request failed: {}", e);
                AppError::CropHealthServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Crop-health API error: {} - {}", status, body);
            return Err(AppError::CropHealthServiceUnavailable);
        }

        let data: FarmerDataResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse farmer data response: {}", e))
        })?;

        Ok(convert_farmer_data(field_id, data))
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    match raw.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!("Dropping unparsable date key: {}", raw);
            None
        }
    }
}

/// Convert the provider payload to our format
fn convert_farmer_data(field_id: &str, data: FarmerDataResponse) -> CropHealthData {
    let mut health: BTreeMap<HealthIndex, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    for (index_name, series) in data.health {
        let Some(index) = HealthIndex::parse(&index_name) else {
            tracing::warn!("Dropping unknown health index: {}", index_name);
            continue;
        };
        let parsed: BTreeMap<NaiveDate, f64> = series
            .into_iter()
            .filter_map(|(date, value)| {
                let date = parse_date(&date)?;
                let value = value.parse::<f64>().ok()?;
                Some((date, value))
            })
            .collect();
        if !parsed.is_empty() {
            health.insert(index, parsed);
        }
    }

    let mut index_breakdown: BTreeMap<NaiveDate, BTreeMap<HealthIndex, Vec<f64>>> =
        BTreeMap::new();
    for (date, per_index) in data.index_breakdown {
        let Some(date) = parse_date(&date) else {
            continue;
        };
        let converted: BTreeMap<HealthIndex, Vec<f64>> = per_index
            .into_iter()
            .filter_map(|(index_name, counts)| {
                let index = HealthIndex::parse(&index_name)?;
                let counts = counts
                    .into_iter()
                    .filter_map(|c| c.parse::<f64>().ok())
                    .collect();
                Some((index, counts))
            })
            .collect();
        index_breakdown.insert(date, converted);
    }

    CropHealthData {
        field_id: field_id.to_string(),
        field_area_sq_m: data.field_area,
        crop_code: data.crop_code,
        health,
        index_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_string_encoded_series() {
        let data = FarmerDataResponse {
            field_area: 42000.0,
            crop_code: "APL".to_string(),
            health: HashMap::from([(
                "ndvi".to_string(),
                HashMap::from([
                    ("2024-06-01".to_string(), "48.2".to_string()),
                    ("2024-06-11".to_string(), "55.3".to_string()),
                    ("not-a-date".to_string(), "10".to_string()),
                ]),
            )]),
            index_breakdown: HashMap::from([(
                "2024-06-11".to_string(),
                HashMap::from([(
                    "ndvi".to_string(),
                    vec!["100".to_string(), "250".to_string()],
                )]),
            )]),
        };

        let converted = convert_farmer_data("123", data);
        let (latest, value) = converted.latest_value(HealthIndex::Ndvi).unwrap();
        assert_eq!(latest, NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
        assert!((value - 55.3).abs() < 1e-9);

        let (_, counts) = converted.latest_breakdown(HealthIndex::Ndvi).unwrap();
        assert_eq!(counts, &[100.0, 250.0]);
    }

    #[test]
    fn unknown_indices_are_dropped() {
        let data = FarmerDataResponse {
            field_area: 1000.0,
            crop_code: "APL".to_string(),
            health: HashMap::from([(
                "mystery".to_string(),
                HashMap::from([("2024-06-01".to_string(), "1.0".to_string())]),
            )]),
            index_breakdown: HashMap::new(),
        };

        let converted = convert_farmer_data("123", data);
        assert!(converted.health.is_empty());
    }
}
