use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StreetSuggestion {
    pub id: i64,
    pub street_name: String,
    pub neighborhood: Option<String>,
    pub description: Option<String>,
    pub suggested_by_name: Option<String>,
    pub suggested_by_email: Option<String>,
    pub is_reviewed: bool,
    /// Null until an admin reviews the suggestion.
    pub is_approved: Option<bool>,
    pub admin_notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
