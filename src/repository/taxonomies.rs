//! Taxonomies repository: categories, languages, and formats.
//!
//! The three lookup tables share the same shape; `Taxonomy` selects which
//! table a call targets. Each operation touches only its own table.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::taxonomy::Lookup,
};

/// Which lookup table a repository call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
    Categories,
    Languages,
    Formats,
}

impl Taxonomy {
    /// Backing table name (static, never interpolated from input)
    pub fn table(&self) -> &'static str {
        match self {
            Taxonomy::Categories => "categories",
            Taxonomy::Languages => "languages",
            Taxonomy::Formats => "formats",
        }
    }

    /// Column on books referencing this taxonomy
    pub fn book_column(&self) -> &'static str {
        match self {
            Taxonomy::Categories => "category_id",
            Taxonomy::Languages => "language_id",
            Taxonomy::Formats => "format_id",
        }
    }

    /// Resource name used in audit entries and error messages
    pub fn resource(&self) -> &'static str {
        match self {
            Taxonomy::Categories => "category",
            Taxonomy::Languages => "language",
            Taxonomy::Formats => "format",
        }
    }
}

#[derive(Clone)]
pub struct TaxonomiesRepository {
    pool: Pool<Postgres>,
}

impl TaxonomiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the full lookup collection in server order
    pub async fn list(&self, taxonomy: Taxonomy) -> AppResult<Vec<Lookup>> {
        let query = format!("SELECT * FROM {} ORDER BY id", taxonomy.table());
        let rows = sqlx::query_as::<_, Lookup>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a lookup row by ID
    pub async fn get_by_id(&self, taxonomy: Taxonomy, id: i32) -> AppResult<Lookup> {
        let query = format!("SELECT * FROM {} WHERE id = $1", taxonomy.table());
        sqlx::query_as::<_, Lookup>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} with id {} not found",
                    taxonomy.resource(),
                    id
                ))
            })
    }

    /// Find a lookup row by exact name, case-insensitive
    pub async fn find_by_name(&self, taxonomy: Taxonomy, name: &str) -> AppResult<Option<Lookup>> {
        let query = format!(
            "SELECT * FROM {} WHERE LOWER(name) = LOWER($1)",
            taxonomy.table()
        );
        let row = sqlx::query_as::<_, Lookup>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Find a lookup row by its code (ISO 639 for languages), case-insensitive
    pub async fn find_by_code(&self, taxonomy: Taxonomy, code: &str) -> AppResult<Option<Lookup>> {
        let query = format!(
            "SELECT * FROM {} WHERE LOWER(code) = LOWER($1)",
            taxonomy.table()
        );
        let row = sqlx::query_as::<_, Lookup>(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Check if a slug already exists
    pub async fn slug_exists(&self, taxonomy: Taxonomy, slug: &str) -> AppResult<bool> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE slug = $1)",
            taxonomy.table()
        );
        let exists: bool = sqlx::query_scalar(&query)
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Insert a new lookup row
    pub async fn create(
        &self,
        taxonomy: Taxonomy,
        name: &str,
        slug: &str,
        code: Option<&str>,
    ) -> AppResult<Lookup> {
        let query = format!(
            "INSERT INTO {} (name, slug, code) VALUES ($1, $2, $3) RETURNING *",
            taxonomy.table()
        );
        let row = sqlx::query_as::<_, Lookup>(&query)
            .bind(name)
            .bind(slug)
            .bind(code)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Partially update a lookup row; None fields are left unchanged
    pub async fn update(
        &self,
        taxonomy: Taxonomy,
        id: i32,
        name: Option<&str>,
        slug: Option<&str>,
        code: Option<&str>,
    ) -> AppResult<Lookup> {
        let query = format!(
            r#"
            UPDATE {} SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                code = COALESCE($4, code),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
            taxonomy.table()
        );
        sqlx::query_as::<_, Lookup>(&query)
            .bind(id)
            .bind(name)
            .bind(slug)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} with id {} not found",
                    taxonomy.resource(),
                    id
                ))
            })
    }

    /// Check if any book references the lookup row
    pub async fn is_referenced(&self, taxonomy: Taxonomy, id: i32) -> AppResult<bool> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM books WHERE {} = $1)",
            taxonomy.book_column()
        );
        let referenced: bool = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(referenced)
    }

    /// Delete a lookup row
    pub async fn delete(&self, taxonomy: Taxonomy, id: i32) -> AppResult<()> {
        let query = format!("DELETE FROM {} WHERE id = $1", taxonomy.table());
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "{} with id {} not found",
                taxonomy.resource(),
                id
            )));
        }
        Ok(())
    }
}
