//! Advisory service for fertilizer, irrigation, pest/weed and yield guidance
//!
//! Advisory documents are produced by an external agronomy pipeline and
//! stored per field. Fields without a document yet fall back to the sample
//! document so the dashboard stays populated.

use sqlx::PgPool;

use shared::{FieldAdvisory, IrrigationDay, WeatherData};

use crate::error::AppResult;

/// Advisory service
#[derive(Clone)]
pub struct AdvisoryService {
    db: PgPool,
}

impl AdvisoryService {
    /// Create a new AdvisoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the advisory document for a field
    pub async fn get_for_field(&self, field_id: &str) -> AppResult<FieldAdvisory> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT document FROM field_advisories WHERE field_id = $1")
                .bind(field_id)
                .fetch_optional(&self.db)
                .await?;

        match row {
            Some((document,)) => match serde_json::from_value::<FieldAdvisory>(document) {
                Ok(advisory) => Ok(advisory),
                Err(e) => {
                    tracing::warn!("Malformed advisory document for field {}: {}", field_id, e);
                    Ok(FieldAdvisory::sample(field_id))
                }
            },
            None => {
                tracing::debug!("No advisory for field {}, serving sample", field_id);
                Ok(FieldAdvisory::sample(field_id))
            }
        }
    }

    /// Irrigation schedule overlaid with the live forecast.
    ///
    /// `weather` is optional: without it the planned probabilities stand.
    pub async fn irrigation_calendar(
        &self,
        field_id: &str,
        weather: Option<&WeatherData>,
    ) -> AppResult<Vec<IrrigationDay>> {
        let advisory = self.get_for_field(field_id).await?;
        Ok(advisory.irrigation_with_forecast(weather))
    }
}
