//! Postgres-backed calendar event store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError |
//! |------------|----------------------|-----------------|
//! | Database (unique violation) | `23505` | `Validation` |
//! | Database (check constraint violation) | `23514` | `Validation` |
//! | Database (other) | Any other | `Unavailable` |
//! | RowNotFound | N/A | `NotFound` |
//! | PoolClosed / Io / Tls / other | N/A | `Unavailable` |
//!
//! ## Ownership
//!
//! Every statement filters on `user_id`, so a row owned by another user is
//! never returned, updated or deleted.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use petpulse_calendar::CalendarEvent;
use petpulse_core::{CalendarEventId, UserId};

use super::{CalendarEventRepository, RepositoryError};

const SELECT_COLUMNS: &str = r#"
    id,
    user_id,
    evento,
    descricao,
    data_inicio,
    data_fim,
    categoria_pet,
    prioridade,
    status,
    campanhas_sugeridas,
    tags,
    created_at,
    updated_at
"#;

/// Postgres-backed calendar event repository.
///
/// Uses the SQLx connection pool, which is `Send + Sync`; the store can be
/// shared behind an `Arc` across request handlers.
#[derive(Debug, Clone)]
pub struct PostgresCalendarStore {
    pool: Arc<PgPool>,
}

impl PostgresCalendarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    /// Open a pool against `database_url` and make sure the table exists.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the `calendar_events` table and its owner index if missing.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS calendar_events (
                id                  UUID PRIMARY KEY,
                user_id             UUID NOT NULL,
                evento              TEXT NOT NULL,
                descricao           TEXT NULL,
                data_inicio         DATE NOT NULL,
                data_fim            DATE NULL,
                categoria_pet       TEXT NOT NULL,
                prioridade          TEXT NOT NULL,
                status              TEXT NOT NULL DEFAULT 'ativo',
                campanhas_sugeridas JSONB NOT NULL DEFAULT '[]'::jsonb,
                tags                JSONB NOT NULL DEFAULT '[]'::jsonb,
                created_at          TIMESTAMPTZ NOT NULL,
                updated_at          TIMESTAMPTZ NOT NULL,
                CHECK (data_fim IS NULL OR data_fim >= data_inicio)
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS calendar_events_owner_start_idx ON calendar_events (user_id, data_inicio, created_at, id)",
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl CalendarEventRepository for PostgresCalendarStore {
    #[instrument(skip(self), fields(user_id = %owner, event_id = %id), err)]
    async fn get(&self, owner: UserId, id: CalendarEventId) -> Result<Option<CalendarEvent>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM calendar_events WHERE user_id = $1 AND id = $2"
        ))
        .bind(owner.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref().map(event_from_row).transpose()
    }

    #[instrument(skip(self), fields(user_id = %owner), err)]
    async fn list(&self, owner: UserId) -> Result<Vec<CalendarEvent>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM calendar_events WHERE user_id = $1 ORDER BY data_inicio ASC, created_at ASC, id ASC"
        ))
        .bind(owner.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(event_from_row).collect()
    }

    #[instrument(skip(self, event), fields(user_id = %event.user_id, event_id = %event.id), err)]
    async fn insert(&self, event: CalendarEvent) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO calendar_events (
                id, user_id, evento, descricao, data_inicio, data_fim,
                categoria_pet, prioridade, status, campanhas_sugeridas, tags,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.user_id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.category.as_str())
        .bind(event.priority.as_str())
        .bind(event.status.as_str())
        .bind(Json(&event.suggested_campaigns))
        .bind(Json(&event.tags))
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(())
    }

    #[instrument(skip(self, event), fields(user_id = %event.user_id, event_id = %event.id), err)]
    async fn update(&self, event: CalendarEvent) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE calendar_events SET
                evento = $3,
                descricao = $4,
                data_inicio = $5,
                data_fim = $6,
                categoria_pet = $7,
                prioridade = $8,
                status = $9,
                campanhas_sugeridas = $10,
                tags = $11,
                updated_at = $12
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(event.user_id.as_uuid())
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(event.category.as_str())
        .bind(event.priority.as_str())
        .bind(event.status.as_str())
        .bind(Json(&event.suggested_campaigns))
        .bind(Json(&event.tags))
        .bind(event.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %owner, event_id = %id), err)]
    async fn delete(&self, owner: UserId, id: CalendarEventId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE user_id = $1 AND id = $2")
            .bind(owner.as_uuid())
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Decode a row and re-check record invariants.
fn event_from_row(row: &PgRow) -> Result<CalendarEvent, RepositoryError> {
    let decode = |e: sqlx::Error| RepositoryError::Unavailable(format!("failed to decode calendar_events row: {e}"));

    let id: Uuid = row.try_get("id").map_err(decode)?;
    let user_id: Uuid = row.try_get("user_id").map_err(decode)?;
    let category: String = row.try_get("categoria_pet").map_err(decode)?;
    let priority: String = row.try_get("prioridade").map_err(decode)?;
    let status: String = row.try_get("status").map_err(decode)?;
    let Json(suggested_campaigns): Json<Vec<String>> = row.try_get("campanhas_sugeridas").map_err(decode)?;
    let Json(tags): Json<Vec<String>> = row.try_get("tags").map_err(decode)?;

    let event = CalendarEvent {
        id: CalendarEventId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        title: row.try_get("evento").map_err(decode)?,
        description: row.try_get("descricao").map_err(decode)?,
        start_date: row.try_get::<NaiveDate, _>("data_inicio").map_err(decode)?,
        end_date: row.try_get::<Option<NaiveDate>, _>("data_fim").map_err(decode)?,
        category: category.parse()?,
        priority: priority.parse()?,
        status: status.parse()?,
        suggested_campaigns,
        tags,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(decode)?,
    };

    event.validate()?;
    Ok(event)
}

/// Map SQLx errors to repository errors (see the module-level table).
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") | Some("23514") => RepositoryError::Validation(msg),
                _ => RepositoryError::Unavailable(msg),
            }
        }
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::PoolClosed => {
            RepositoryError::Unavailable(format!("connection pool closed in {}", operation))
        }
        other => RepositoryError::Unavailable(format!("sqlx error in {}: {}", operation, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert_eq!(map_sqlx_error("get", sqlx::Error::RowNotFound), RepositoryError::NotFound);
    }

    #[test]
    fn pool_closed_is_unavailable() {
        assert!(matches!(
            map_sqlx_error("list", sqlx::Error::PoolClosed),
            RepositoryError::Unavailable(msg) if msg.contains("list")
        ));
    }
}
