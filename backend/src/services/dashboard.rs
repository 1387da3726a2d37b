//! Dashboard service: the combined field snapshot
//!
//! Weather and crop-health are independent providers. The snapshot fetches
//! both concurrently, degrades each failure to a `None` section (the
//! dashboard renders a placeholder), and tags the result with the field id
//! it was computed for so clients can discard responses that arrive after
//! the selection has moved on.

use chrono::Utc;

use shared::FieldSnapshot;

use crate::error::AppResult;
use crate::external::{CropHealthClient, WeatherClient};

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    weather: WeatherClient,
    crop_health: CropHealthClient,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(weather: WeatherClient, crop_health: CropHealthClient) -> Self {
        Self {
            weather,
            crop_health,
        }
    }

    /// Fetch weather and crop-health for a field in parallel.
    ///
    /// Neither fetch is ordered relative to the other, and neither failure
    /// hides the other's data.
    pub async fn field_snapshot(&self, field_id: &str) -> AppResult<FieldSnapshot> {
        let (weather, crop_health) = tokio::join!(
            self.weather.get_forecast(field_id),
            self.crop_health.get_farmer_data(field_id),
        );

        let weather = weather
            .map_err(|e| tracing::warn!("Weather unavailable for field {}: {}", field_id, e))
            .ok();
        let crop_health = crop_health
            .map_err(|e| tracing::warn!("Crop health unavailable for field {}: {}", field_id, e))
            .ok();

        Ok(FieldSnapshot {
            field_id: field_id.to_string(),
            fetched_at: Utc::now(),
            weather,
            crop_health,
        })
    }
}
