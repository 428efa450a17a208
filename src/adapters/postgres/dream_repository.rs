//! PostgreSQL implementation of DreamRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::map_sqlx_error;
use crate::domain::dream::{DreamFilter, DreamRecord, Mood};
use crate::domain::foundation::{DomainError, DreamId, ErrorCode, Timestamp, UserId};
use crate::ports::DreamRepository;

const SELECT_COLUMNS: &str = "id, user_id, dream_text, analysis, conversation, keywords, mood, emotions, created_at";

/// PostgreSQL implementation of DreamRepository.
#[derive(Clone)]
pub struct PostgresDreamRepository {
    pool: PgPool,
}

impl PostgresDreamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DreamRepository for PostgresDreamRepository {
    async fn save(&self, dream: &DreamRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO dreams (
                id, user_id, dream_text, analysis, conversation, keywords, mood, emotions, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(dream.id().as_uuid())
        .bind(dream.owner().as_str())
        .bind(dream.dream_text())
        .bind(dream.analysis())
        .bind(dream.conversation())
        .bind(dream.keywords())
        .bind(dream.mood().as_str())
        .bind(dream.emotions())
        .bind(dream.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert dream", e))?;

        Ok(())
    }

    async fn find_by_id(&self, owner: &UserId, id: &DreamId) -> Result<Option<DreamRecord>, DomainError> {
        let sql = format!("SELECT {} FROM dreams WHERE id = $1 AND user_id = $2", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("fetch dream", e))?;

        row.map(row_to_dream).transpose()
    }

    async fn search(&self, owner: &UserId, filter: &DreamFilter) -> Result<Vec<DreamRecord>, DomainError> {
        // strpos avoids treating user input as LIKE wildcards
        let sql = format!(
            r#"
            SELECT {}
            FROM dreams
            WHERE user_id = $1
              AND ($2::text IS NULL
                   OR strpos(lower(dream_text), lower($2)) > 0
                   OR EXISTS (SELECT 1 FROM unnest(keywords) AS k WHERE strpos(lower(k), lower($2)) > 0))
              AND ($3::date IS NULL OR (created_at AT TIME ZONE 'UTC')::date = $3)
              AND ($4::text IS NULL OR mood = $4)
            ORDER BY created_at DESC
            "#,
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(owner.as_str())
            .bind(filter.text.as_deref())
            .bind(filter.date)
            .bind(filter.mood.map(|m| m.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("search dreams", e))?;

        rows.into_iter().map(row_to_dream).collect()
    }

    async fn recent(&self, owner: &UserId, limit: usize) -> Result<Vec<DreamRecord>, DomainError> {
        let sql = format!(
            "SELECT {} FROM dreams WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
            SELECT_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(owner.as_str())
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("fetch recent dreams", e))?;

        rows.into_iter().map(row_to_dream).collect()
    }
}

fn row_to_dream(row: sqlx::postgres::PgRow) -> Result<DreamRecord, DomainError> {
    let column = |name: &str, e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    };

    let id: uuid::Uuid = row.try_get("id").map_err(|e| column("id", e))?;
    let user_id: String = row.try_get("user_id").map_err(|e| column("user_id", e))?;
    let dream_text: String = row.try_get("dream_text").map_err(|e| column("dream_text", e))?;
    let analysis: String = row.try_get("analysis").map_err(|e| column("analysis", e))?;
    let conversation: String = row
        .try_get("conversation")
        .map_err(|e| column("conversation", e))?;
    let keywords: Vec<String> = row.try_get("keywords").map_err(|e| column("keywords", e))?;
    let mood: String = row.try_get("mood").map_err(|e| column("mood", e))?;
    let emotions: Vec<String> = row.try_get("emotions").map_err(|e| column("emotions", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column("created_at", e))?;

    let owner = UserId::new(user_id).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
    })?;
    let mood = mood.parse::<Mood>().unwrap_or_else(|_| {
        tracing::warn!(mood = %mood, "Stored mood outside the known set, using neutral");
        Mood::Neutral
    });

    Ok(DreamRecord::reconstitute(
        DreamId::from_uuid(id),
        owner,
        dream_text,
        analysis,
        conversation,
        keywords,
        mood,
        emotions,
        Timestamp::from_datetime(created_at),
    ))
}
