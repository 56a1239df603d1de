//! Contributor roles repository for database operations.
//! Writes go to the roles table only.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::role::Role,
};

#[derive(Clone)]
pub struct RolesRepository {
    pool: Pool<Postgres>,
}

impl RolesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the full role collection in server order
    pub async fn list(&self) -> AppResult<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(roles)
    }

    /// Get role by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Role> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role with id {} not found", id)))
    }

    /// Check if a slug already exists
    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM roles WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Insert a new role
    pub async fn create(&self, name: &str, slug: &str, marc_code: Option<&str>) -> AppResult<Role> {
        let role = sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name, slug, marc_code) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(slug)
        .bind(marc_code)
        .fetch_one(&self.pool)
        .await?;
        Ok(role)
    }

    /// Partially update a role; None fields are left unchanged
    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        slug: Option<&str>,
        marc_code: Option<&str>,
    ) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            r#"
            UPDATE roles SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                marc_code = COALESCE($4, marc_code),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(marc_code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role with id {} not found", id)))
    }

    /// Delete a role
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Role with id {} not found", id)));
        }
        Ok(())
    }
}
