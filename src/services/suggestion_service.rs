use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{StreetStatus, StreetSuggestion};

/// Fields for a new citizen suggestion.
#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub street_name: String,
    pub neighborhood: Option<String>,
    pub description: Option<String>,
    pub suggested_by_name: Option<String>,
    pub suggested_by_email: Option<String>,
}

pub struct SuggestionService {
    pool: PgPool,
}

impl SuggestionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Public submission; starts unreviewed.
    pub async fn create(
        &self,
        suggestion: NewSuggestion,
    ) -> Result<StreetSuggestion, DatabaseError> {
        let created = sqlx::query_as::<_, StreetSuggestion>(
            r#"
            INSERT INTO street_suggestions
                (street_name, neighborhood, description, suggested_by_name, suggested_by_email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(suggestion.street_name)
        .bind(suggestion.neighborhood)
        .bind(suggestion.description)
        .bind(suggestion.suggested_by_name)
        .bind(suggestion.suggested_by_email)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(suggestion_id = created.id, "suggestion submitted");
        Ok(created)
    }

    /// All suggestions, newest first.
    pub async fn list(&self) -> Result<Vec<StreetSuggestion>, DatabaseError> {
        let suggestions = sqlx::query_as::<_, StreetSuggestion>(
            "SELECT * FROM street_suggestions ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(suggestions)
    }

    /// Record an admin review. Approval additionally promotes the suggestion
    /// into a planned street.
    ///
    /// The promotion is best-effort: it runs after the review write, outside
    /// any transaction, and a failure is logged without affecting the review
    /// result. An approved suggestion can therefore briefly lack its street;
    /// re-approval or manual creation recovers.
    pub async fn review(
        &self,
        id: i64,
        is_approved: bool,
        admin_notes: Option<String>,
    ) -> Result<StreetSuggestion, DatabaseError> {
        let suggestion = sqlx::query_as::<_, StreetSuggestion>(
            r#"
            UPDATE street_suggestions
            SET is_reviewed = TRUE,
                is_approved = $1,
                admin_notes = $2,
                reviewed_at = now(),
                updated_at = now()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(is_approved)
        .bind(admin_notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("Suggestion not found".to_string()))?;

        if is_approved {
            if let Err(e) = self.promote_to_street(&suggestion).await {
                tracing::error!(
                    suggestion_id = suggestion.id,
                    "approved suggestion could not be promoted to a street: {}",
                    e
                );
            }
        }

        Ok(suggestion)
    }

    async fn promote_to_street(&self, suggestion: &StreetSuggestion) -> Result<(), DatabaseError> {
        let notes = format!(
            "Criada a partir de sugestão: {}",
            suggestion.description.as_deref().unwrap_or("")
        );

        sqlx::query(
            r#"
            INSERT INTO streets (name, neighborhood, status, notes)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&suggestion.street_name)
        .bind(&suggestion.neighborhood)
        .bind(StreetStatus::Planned)
        .bind(notes)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            suggestion_id = suggestion.id,
            street_name = %suggestion.street_name,
            "approved suggestion promoted to street"
        );
        Ok(())
    }
}
