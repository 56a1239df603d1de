//! Contributor role model (editor, illustrator, narrator, ...)

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::collection::CollectionItem;

/// Full contributor role model from database.
/// `marc_code` is the numeric MARC relator function code, when known.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub marc_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create role request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRole {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(max = 8))]
    pub marc_code: Option<String>,
}

/// Update role request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRole {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(max = 8))]
    pub marc_code: Option<String>,
}

/// Sort fields available on role list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoleSortField {
    Name,
    MarcCode,
    CreatedAt,
}

impl CollectionItem for Role {
    type SortField = RoleSortField;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(ref code) = self.marc_code {
            fields.push(code);
        }
        fields
    }

    fn compare_by(&self, other: &Self, field: RoleSortField) -> Ordering {
        match field {
            RoleSortField::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            RoleSortField::MarcCode => self.marc_code.cmp(&other.marc_code),
            RoleSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}
