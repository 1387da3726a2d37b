//! Activity log models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a scheduled activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::InProgress => "in_progress",
            ActivityStatus::Completed => "completed",
            ActivityStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ActivityStatus::Pending),
            "in_progress" => Some(ActivityStatus::InProgress),
            "completed" => Some(ActivityStatus::Completed),
            "cancelled" => Some(ActivityStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-logged farm activity (irrigation run, fertilizer application, ...)
///
/// The write path is owned by the scheduler; the dashboard reads these for
/// the activities report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub farm_id: Uuid,
    /// Free-form kind, e.g. "irrigation", "fertilizer", "harvesting"
    pub activity_type: String,
    pub title: String,
    pub status: ActivityStatus,
    pub scheduled_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
