//! Audit log repository. Append and read only; the table has no update or
//! delete path.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::audit::{AuditEntry, NewAuditEntry},
};

#[derive(Clone)]
pub struct AuditRepository {
    pool: Pool<Postgres>,
}

impl AuditRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the full audit collection in server order
    pub async fn list(&self) -> AppResult<Vec<AuditEntry>> {
        let entries = sqlx::query_as::<_, AuditEntry>("SELECT * FROM audit_log ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    /// Get an audit entry by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<AuditEntry> {
        sqlx::query_as::<_, AuditEntry>("SELECT * FROM audit_log WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Audit entry with id {} not found", id)))
    }

    /// Append an entry to the log
    pub async fn append(&self, entry: &NewAuditEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (actor_id, actor_login, action, resource, resource_id, detail)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.actor_id)
        .bind(&entry.actor_login)
        .bind(entry.action.as_str())
        .bind(&entry.resource)
        .bind(entry.resource_id)
        .bind(&entry.detail)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
