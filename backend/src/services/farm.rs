//! Farm service for reading the user's farm list
//!
//! Farms are created by an external setup flow and are read-only here.

use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{BoundaryPoint, Farm};

use crate::error::{AppError, AppResult};

/// Farm service
#[derive(Clone)]
pub struct FarmService {
    db: PgPool,
}

/// Raw farm row; the boundary is stored as a JSON array of
/// `[longitude, latitude]` pairs
#[derive(Debug, FromRow)]
struct FarmRow {
    id: Uuid,
    owner_phone: String,
    farm_name: String,
    location: String,
    crop: String,
    field_id: String,
    boundary: Option<Value>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

fn parse_boundary(raw: Option<Value>) -> Option<Vec<BoundaryPoint>> {
    let raw = raw?;
    let points = match serde_json::from_value::<Vec<BoundaryPoint>>(raw) {
        Ok(points) => points,
        Err(e) => {
            tracing::warn!("Dropping malformed farm boundary: {}", e);
            return None;
        }
    };
    // Out-of-range boundaries degrade to "no boundary" (the map renders a
    // placeholder) instead of failing the farm fetch. Short boundaries pass
    // through; the viewport fit renders them as placeholders anyway.
    if points.len() >= shared::geo::MIN_POLYGON_POINTS {
        if let Err(e) = shared::validate_boundary(&points) {
            tracing::warn!("Dropping invalid farm boundary: {}", e);
            return None;
        }
    }
    Some(points)
}

impl From<FarmRow> for Farm {
    fn from(row: FarmRow) -> Self {
        Farm {
            id: row.id,
            owner_phone: row.owner_phone,
            farm_name: row.farm_name,
            location: row.location,
            crop: row.crop,
            field_id: row.field_id,
            boundary: parse_boundary(row.boundary),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl FarmService {
    /// Create a new FarmService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the farms owned by a phone account, oldest first.
    ///
    /// Ordering is stable so "auto-select the first farm" picks the same
    /// farm on every load.
    pub async fn list_for_phone(&self, phone: &str) -> AppResult<Vec<Farm>> {
        shared::validate_phone(phone).map_err(|e| AppError::Validation(e.to_string()))?;

        let rows = sqlx::query_as::<_, FarmRow>(
            r#"
            SELECT id, owner_phone, farm_name, location, crop, field_id, boundary,
                   created_at, updated_at
            FROM farms
            WHERE owner_phone = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(phone)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Farm::from).collect())
    }

    /// Get a farm by ID
    pub async fn get(&self, farm_id: Uuid) -> AppResult<Farm> {
        let row = sqlx::query_as::<_, FarmRow>(
            r#"
            SELECT id, owner_phone, farm_name, location, crop, field_id, boundary,
                   created_at, updated_at
            FROM farms
            WHERE id = $1
            "#,
        )
        .bind(farm_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farm".to_string()))?;

        Ok(row.into())
    }
}
