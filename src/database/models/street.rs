use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Cabling-work status of a street, stored as the `street_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "street_status", rename_all = "snake_case")]
pub enum StreetStatus {
    Planned,
    InProgress,
    Completed,
}

impl Default for StreetStatus {
    fn default() -> Self {
        StreetStatus::Planned
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Street {
    pub id: i64,
    pub name: String,
    pub neighborhood: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: StreetStatus,
    pub notes: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
