use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::StreetPhoto;

/// Photo records attached to streets. Only metadata lives here; the binary
/// content is stored by an external object store referenced through `url`.
pub struct PhotoService {
    pool: PgPool,
}

impl PhotoService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_street(&self, street_id: i64) -> Result<Vec<StreetPhoto>, DatabaseError> {
        let photos = sqlx::query_as::<_, StreetPhoto>(
            "SELECT * FROM street_photos WHERE street_id = $1 ORDER BY created_at DESC",
        )
        .bind(street_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(photos)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM street_photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Photo not found".to_string()));
        }

        Ok(())
    }
}
