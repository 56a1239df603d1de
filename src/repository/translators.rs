//! Translators repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::translator::Translator,
};

const SELECT: &str = r#"
    SELECT t.*, l.name AS language_name
    FROM translators t
    LEFT JOIN languages l ON t.language_id = l.id
"#;

#[derive(Clone)]
pub struct TranslatorsRepository {
    pool: Pool<Postgres>,
}

impl TranslatorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the full translator collection in server order
    pub async fn list(&self) -> AppResult<Vec<Translator>> {
        let query = format!("{} ORDER BY t.id", SELECT);
        let translators = sqlx::query_as::<_, Translator>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(translators)
    }

    /// Get translator by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Translator> {
        let query = format!("{} WHERE t.id = $1", SELECT);
        sqlx::query_as::<_, Translator>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Translator with id {} not found", id)))
    }

    /// Check if a slug already exists
    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM translators WHERE slug = $1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Insert a new translator
    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        language_id: Option<i32>,
    ) -> AppResult<Translator> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO translators (name, slug, language_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(slug)
        .bind(language_id)
        .fetch_one(&self.pool)
        .await?;
        self.get_by_id(id).await
    }

    /// Partially update a translator; None fields are left unchanged.
    /// Writes go to the translators table only.
    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        slug: Option<&str>,
        language_id: Option<i32>,
    ) -> AppResult<Translator> {
        let result = sqlx::query(
            r#"
            UPDATE translators SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                language_id = COALESCE($4, language_id),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(language_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Translator with id {} not found",
                id
            )));
        }
        self.get_by_id(id).await
    }

    /// Check if any book references the translator
    pub async fn is_referenced(&self, id: i32) -> AppResult<bool> {
        let referenced: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE translator_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(referenced)
    }

    /// Delete a translator
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM translators WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Translator with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
