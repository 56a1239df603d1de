//! Audit log model. The log is append-only; there is no update or delete
//! surface, only appends from mutation paths and a read-only listing.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::collection::CollectionItem;

/// Action recorded in an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Import,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Login => "login",
            AuditAction::Import => "import",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable audit log row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditEntry {
    pub id: i64,
    /// Acting user id; NULL when the account was since deleted
    pub actor_id: Option<i32>,
    pub actor_login: String,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<i32>,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for appending an audit entry
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub actor_id: Option<i32>,
    pub actor_login: String,
    pub action: AuditAction,
    pub resource: String,
    pub resource_id: Option<i32>,
    pub detail: Option<String>,
}

/// Sort fields available on audit list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditSortField {
    CreatedAt,
    Actor,
    Resource,
}

impl CollectionItem for AuditEntry {
    type SortField = AuditSortField;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.actor_login.as_str(),
            self.action.as_str(),
            self.resource.as_str(),
        ];
        if let Some(ref detail) = self.detail {
            fields.push(detail);
        }
        fields
    }

    fn compare_by(&self, other: &Self, field: AuditSortField) -> Ordering {
        match field {
            AuditSortField::CreatedAt => self.created_at.cmp(&other.created_at),
            AuditSortField::Actor => self
                .actor_login
                .to_lowercase()
                .cmp(&other.actor_login.to_lowercase()),
            AuditSortField::Resource => self.resource.cmp(&other.resource),
        }
    }
}
