//! Penalty rule model and related types.
//!
//! A penalty rule describes what happens once a loan runs past its due
//! date: a per-day fine (stored in cents) and an optional borrowing
//! suspension. Only active rules are applied by the circulation desk.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::collection::CollectionItem;

/// Full penalty rule model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PenaltyRule {
    pub id: i32,
    pub name: String,
    /// Days overdue before the rule triggers
    pub days_overdue: i32,
    /// Fine per overdue day, in cents
    pub fine_per_day_cents: i32,
    /// Borrowing suspension length in days (0 = none)
    pub suspension_days: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create penalty rule request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePenaltyRule {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0, max = 365))]
    pub days_overdue: i32,
    #[validate(range(min = 0, max = 100_000))]
    pub fine_per_day_cents: i32,
    #[validate(range(min = 0, max = 365))]
    pub suspension_days: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Update penalty rule request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePenaltyRule {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 365))]
    pub days_overdue: Option<i32>,
    #[validate(range(min = 0, max = 100_000))]
    pub fine_per_day_cents: Option<i32>,
    #[validate(range(min = 0, max = 365))]
    pub suspension_days: Option<i32>,
    pub active: Option<bool>,
}

/// Sort fields available on penalty rule list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PenaltySortField {
    Name,
    DaysOverdue,
    FinePerDay,
    CreatedAt,
}

impl CollectionItem for PenaltyRule {
    type SortField = PenaltySortField;

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn compare_by(&self, other: &Self, field: PenaltySortField) -> Ordering {
        match field {
            PenaltySortField::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            PenaltySortField::DaysOverdue => self.days_overdue.cmp(&other.days_overdue),
            PenaltySortField::FinePerDay => self.fine_per_day_cents.cmp(&other.fine_per_day_cents),
            PenaltySortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
