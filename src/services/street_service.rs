use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::api::requests::UpdateStreetRequest;
use crate::database::manager::DatabaseError;
use crate::database::models::{Street, StreetStatus};

/// Fields for a new street record.
#[derive(Debug, Clone)]
pub struct NewStreet {
    pub name: String,
    pub neighborhood: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: StreetStatus,
    pub notes: Option<String>,
}

/// How a lifecycle timestamp changes in an update: stamped with the
/// database clock, or set to a caller-supplied instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimestampChange {
    Now,
    At(DateTime<Utc>),
}

/// Explicit partial-update structure for streets.
///
/// Only fields present in the patch are touched; the update routine that
/// interprets it is fixed, with every value bound as a parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreetPatch {
    pub status: Option<StreetStatus>,
    pub notes: Option<String>,
    pub started_at: Option<TimestampChange>,
    pub completed_at: Option<TimestampChange>,
}

impl StreetPatch {
    /// Derive a patch from an update request, applying the status-transition
    /// timestamping policy:
    ///
    /// - status set to `in_progress` with no explicit `started_at` stamps
    ///   `started_at` with the database clock;
    /// - status set to `completed` with no explicit `completed_at` stamps
    ///   `completed_at` likewise;
    /// - explicit timestamps in the request always win.
    ///
    /// The automatic stamp is applied on every matching call, even when the
    /// column already holds a value. Repeating an identical `completed`
    /// update therefore moves `completed_at` forward; callers wanting to
    /// preserve an earlier instant must pass it explicitly.
    pub fn from_request(req: &UpdateStreetRequest) -> Self {
        let mut patch = StreetPatch {
            status: req.status,
            notes: req.notes.clone(),
            started_at: req.started_at.map(TimestampChange::At),
            completed_at: req.completed_at.map(TimestampChange::At),
        };

        match req.status {
            Some(StreetStatus::InProgress) if req.started_at.is_none() => {
                patch.started_at = Some(TimestampChange::Now);
            }
            Some(StreetStatus::Completed) if req.completed_at.is_none() => {
                patch.completed_at = Some(TimestampChange::Now);
            }
            _ => {}
        }

        patch
    }
}

pub struct StreetService {
    pool: PgPool,
}

impl StreetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All streets, newest first. No pagination: the tracked street set is
    /// municipal-scale and the map consumes it whole.
    pub async fn list(&self) -> Result<Vec<Street>, DatabaseError> {
        let streets =
            sqlx::query_as::<_, Street>("SELECT * FROM streets ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(streets)
    }

    pub async fn get(&self, id: i64) -> Result<Street, DatabaseError> {
        sqlx::query_as::<_, Street>("SELECT * FROM streets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Street not found".to_string()))
    }

    pub async fn create(&self, street: NewStreet) -> Result<Street, DatabaseError> {
        let created = sqlx::query_as::<_, Street>(
            r#"
            INSERT INTO streets (name, neighborhood, latitude, longitude, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(street.name)
        .bind(street.neighborhood)
        .bind(street.latitude)
        .bind(street.longitude)
        .bind(street.status)
        .bind(street.notes)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(street_id = created.id, "street created");
        Ok(created)
    }

    /// Apply a patch to a street. `updated_at` is always refreshed;
    /// everything else is touched only when present in the patch.
    pub async fn update(&self, id: i64, patch: StreetPatch) -> Result<Street, DatabaseError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE streets SET updated_at = now()");

        if let Some(status) = patch.status {
            query.push(", status = ");
            query.push_bind(status);
        }
        if let Some(notes) = patch.notes {
            query.push(", notes = ");
            query.push_bind(notes);
        }
        match patch.started_at {
            Some(TimestampChange::Now) => {
                query.push(", started_at = now()");
            }
            Some(TimestampChange::At(ts)) => {
                query.push(", started_at = ");
                query.push_bind(ts);
            }
            None => {}
        }
        match patch.completed_at {
            Some(TimestampChange::Now) => {
                query.push(", completed_at = now()");
            }
            Some(TimestampChange::At(ts)) => {
                query.push(", completed_at = ");
                query.push_bind(ts);
            }
            None => {}
        }

        query.push(" WHERE id = ");
        query.push_bind(id);
        query.push(" RETURNING *");

        query
            .build_query_as::<Street>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Street not found".to_string()))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM streets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Street not found".to_string()));
        }

        tracing::info!(street_id = id, "street deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn explicit_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_request_derives_empty_patch() {
        let patch = StreetPatch::from_request(&UpdateStreetRequest::default());
        assert_eq!(patch, StreetPatch::default());
    }

    #[test]
    fn in_progress_without_started_at_stamps_now() {
        let req = UpdateStreetRequest {
            status: Some(StreetStatus::InProgress),
            ..Default::default()
        };
        let patch = StreetPatch::from_request(&req);
        assert_eq!(patch.started_at, Some(TimestampChange::Now));
        assert!(patch.completed_at.is_none());
    }

    #[test]
    fn completed_without_completed_at_stamps_now() {
        let req = UpdateStreetRequest {
            status: Some(StreetStatus::Completed),
            ..Default::default()
        };
        let patch = StreetPatch::from_request(&req);
        assert_eq!(patch.completed_at, Some(TimestampChange::Now));
        assert!(patch.started_at.is_none());
    }

    #[test]
    fn explicit_started_at_wins_over_auto_stamp() {
        let req = UpdateStreetRequest {
            status: Some(StreetStatus::InProgress),
            started_at: Some(explicit_instant()),
            ..Default::default()
        };
        let patch = StreetPatch::from_request(&req);
        assert_eq!(patch.started_at, Some(TimestampChange::At(explicit_instant())));
    }

    #[test]
    fn explicit_completed_at_wins_over_auto_stamp() {
        let req = UpdateStreetRequest {
            status: Some(StreetStatus::Completed),
            completed_at: Some(explicit_instant()),
            ..Default::default()
        };
        let patch = StreetPatch::from_request(&req);
        assert_eq!(
            patch.completed_at,
            Some(TimestampChange::At(explicit_instant()))
        );
    }

    #[test]
    fn explicit_timestamps_apply_without_status_change() {
        let req = UpdateStreetRequest {
            started_at: Some(explicit_instant()),
            completed_at: Some(explicit_instant()),
            ..Default::default()
        };
        let patch = StreetPatch::from_request(&req);
        assert_eq!(patch.started_at, Some(TimestampChange::At(explicit_instant())));
        assert_eq!(
            patch.completed_at,
            Some(TimestampChange::At(explicit_instant()))
        );
        assert!(patch.status.is_none());
    }

    #[test]
    fn planned_status_never_stamps_timestamps() {
        let req = UpdateStreetRequest {
            status: Some(StreetStatus::Planned),
            notes: Some("rescheduled".to_string()),
            ..Default::default()
        };
        let patch = StreetPatch::from_request(&req);
        assert!(patch.started_at.is_none());
        assert!(patch.completed_at.is_none());
        assert_eq!(patch.notes.as_deref(), Some("rescheduled"));
    }

    #[test]
    fn repeated_completed_update_restamps() {
        // The auto-stamp is unconditional; it never checks whether the
        // column already holds a value.
        let req = UpdateStreetRequest {
            status: Some(StreetStatus::Completed),
            ..Default::default()
        };
        let first = StreetPatch::from_request(&req);
        let second = StreetPatch::from_request(&req);
        assert_eq!(first.completed_at, Some(TimestampChange::Now));
        assert_eq!(second.completed_at, Some(TimestampChange::Now));
    }
}
