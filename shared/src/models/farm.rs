//! Farm models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::BoundaryPoint;

use super::{CropHealthData, WeatherData};

/// A farm owned by a user account
///
/// Created by an external setup flow; read-only within this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: Uuid,
    /// Phone number of the owning account
    pub owner_phone: String,
    pub farm_name: String,
    pub location: String,
    pub crop: String,
    /// Identifier of the field at the weather/crop-health providers
    pub field_id: String,
    /// Polygon boundary as ordered `[longitude, latitude]` pairs.
    /// Needs at least 3 points to be renderable.
    pub boundary: Option<Vec<BoundaryPoint>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Farm {
    /// Whether the boundary has enough vertices to draw a polygon
    pub fn has_renderable_boundary(&self) -> bool {
        self.boundary
            .as_deref()
            .map(|b| b.len() >= crate::geo::MIN_POLYGON_POINTS)
            .unwrap_or(false)
    }
}

/// Combined field data for the dashboard, fetched in one round trip.
///
/// Tagged with the field id it was computed for: a client that switched
/// farms while the request was in flight compares `field_id` against its
/// current selection and discards mismatches instead of overwriting newer
/// state with a stale response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub field_id: String,
    pub fetched_at: DateTime<Utc>,
    /// `None` means the weather provider was unavailable; render a placeholder
    pub weather: Option<WeatherData>,
    /// `None` means the crop-health provider was unavailable
    pub crop_health: Option<CropHealthData>,
}
