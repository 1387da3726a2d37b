//! Activity log service
//!
//! The scheduler owns the activity lifecycle; this service persists the
//! per-farm log the activities report reads. The write path is the minimal
//! set the scheduler needs: create and status updates.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use shared::{Activity, ActivityStatus};

use crate::error::{AppError, AppResult};

/// Activity service
#[derive(Clone)]
pub struct ActivityService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct ActivityRow {
    id: Uuid,
    farm_id: Uuid,
    activity_type: String,
    title: String,
    status: String,
    scheduled_date: NaiveDate,
    notes: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        let status = ActivityStatus::parse(&row.status).unwrap_or_else(|| {
            tracing::warn!("Unknown activity status {:?}, treating as pending", row.status);
            ActivityStatus::Pending
        });
        Activity {
            id: row.id,
            farm_id: row.farm_id,
            activity_type: row.activity_type,
            title: row.title,
            status,
            scheduled_date: row.scheduled_date,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// Input for logging an activity
#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityInput {
    #[validate(length(min = 1, max = 50))]
    pub activity_type: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub scheduled_date: NaiveDate,
    pub notes: Option<String>,
}

impl ActivityService {
    /// Create a new ActivityService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List a farm's activities, earliest scheduled first
    pub async fn list_for_farm(&self, farm_id: Uuid) -> AppResult<Vec<Activity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, farm_id, activity_type, title, status, scheduled_date, notes, created_at
            FROM activities
            WHERE farm_id = $1
            ORDER BY scheduled_date ASC, created_at ASC
            "#,
        )
        .bind(farm_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Activity::from).collect())
    }

    /// Log a new activity for a farm
    pub async fn create(&self, farm_id: Uuid, input: CreateActivityInput) -> AppResult<Activity> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            INSERT INTO activities (farm_id, activity_type, title, status, scheduled_date, notes)
            VALUES ($1, $2, $3, 'pending', $4, $5)
            RETURNING id, farm_id, activity_type, title, status, scheduled_date, notes, created_at
            "#,
        )
        .bind(farm_id)
        .bind(&input.activity_type)
        .bind(&input.title)
        .bind(input.scheduled_date)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update the status of an activity
    pub async fn set_status(
        &self,
        farm_id: Uuid,
        activity_id: Uuid,
        status: ActivityStatus,
    ) -> AppResult<Activity> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            UPDATE activities
            SET status = $1
            WHERE id = $2 AND farm_id = $3
            RETURNING id, farm_id, activity_type, title, status, scheduled_date, notes, created_at
            "#,
        )
        .bind(status.as_str())
        .bind(activity_id)
        .bind(farm_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity".to_string()))?;

        Ok(row.into())
    }
}
