//! Lookup taxonomies: categories, languages, and formats.
//!
//! The three taxonomies share one row shape; each repository call targets
//! its own backing table. `code` carries the ISO 639 code for languages and
//! the short form code for formats; categories leave it empty.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::collection::CollectionItem;

/// A lookup taxonomy row (category, language, or format)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lookup {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create lookup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLookup {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(max = 16))]
    pub code: Option<String>,
}

/// Update lookup request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLookup {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(max = 16))]
    pub code: Option<String>,
}

/// Sort fields available on taxonomy list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LookupSortField {
    Name,
    Code,
    CreatedAt,
}

impl CollectionItem for Lookup {
    type SortField = LookupSortField;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(ref code) = self.code {
            fields.push(code);
        }
        fields
    }

    fn compare_by(&self, other: &Self, field: LookupSortField) -> Ordering {
        match field {
            LookupSortField::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            LookupSortField::Code => self.code.cmp(&other.code),
            LookupSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}
