//! Author model and related types

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::collection::CollectionItem;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 4000))]
    pub bio: Option<String>,
}

/// Update author request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 4000))]
    pub bio: Option<String>,
}

/// Sort fields available on author list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthorSortField {
    Name,
    Email,
    CreatedAt,
}

impl CollectionItem for Author {
    type SortField = AuthorSortField;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(ref email) = self.email {
            fields.push(email);
        }
        fields
    }

    fn compare_by(&self, other: &Self, field: AuthorSortField) -> Ordering {
        match field {
            AuthorSortField::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            AuthorSortField::Email => self.email.cmp(&other.email),
            AuthorSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}
