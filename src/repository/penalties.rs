//! Penalty rules repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::penalty::{CreatePenaltyRule, PenaltyRule, UpdatePenaltyRule},
};

#[derive(Clone)]
pub struct PenaltiesRepository {
    pool: Pool<Postgres>,
}

impl PenaltiesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the full penalty rule collection in server order
    pub async fn list(&self) -> AppResult<Vec<PenaltyRule>> {
        let rules = sqlx::query_as::<_, PenaltyRule>("SELECT * FROM penalty_rules ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rules)
    }

    /// Get penalty rule by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<PenaltyRule> {
        sqlx::query_as::<_, PenaltyRule>("SELECT * FROM penalty_rules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Penalty rule with id {} not found", id)))
    }

    /// Check if a rule with the same name already exists
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM penalty_rules WHERE LOWER(name) = LOWER($1) AND id != $2)",
            )
            .bind(name)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM penalty_rules WHERE LOWER(name) = LOWER($1))",
            )
            .bind(name)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(exists)
    }

    /// Insert a new penalty rule
    pub async fn create(&self, rule: &CreatePenaltyRule) -> AppResult<PenaltyRule> {
        let created = sqlx::query_as::<_, PenaltyRule>(
            r#"
            INSERT INTO penalty_rules (name, days_overdue, fine_per_day_cents,
                                       suspension_days, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&rule.name)
        .bind(rule.days_overdue)
        .bind(rule.fine_per_day_cents)
        .bind(rule.suspension_days)
        .bind(rule.active)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Partially update a penalty rule; None fields are left unchanged
    pub async fn update(&self, id: i32, rule: &UpdatePenaltyRule) -> AppResult<PenaltyRule> {
        sqlx::query_as::<_, PenaltyRule>(
            r#"
            UPDATE penalty_rules SET
                name = COALESCE($2, name),
                days_overdue = COALESCE($3, days_overdue),
                fine_per_day_cents = COALESCE($4, fine_per_day_cents),
                suspension_days = COALESCE($5, suspension_days),
                active = COALESCE($6, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&rule.name)
        .bind(rule.days_overdue)
        .bind(rule.fine_per_day_cents)
        .bind(rule.suspension_days)
        .bind(rule.active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Penalty rule with id {} not found", id)))
    }

    /// Delete a penalty rule
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM penalty_rules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Penalty rule with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
