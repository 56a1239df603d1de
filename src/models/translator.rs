//! Translator model and related types

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::collection::CollectionItem;

/// Full translator model from database.
/// `language_name` is joined from the languages taxonomy for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Translator {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub language_id: Option<i32>,
    pub language_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create translator request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTranslator {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub language_id: Option<i32>,
}

/// Update translator request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTranslator {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub language_id: Option<i32>,
}

/// Sort fields available on translator list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TranslatorSortField {
    Name,
    Language,
    CreatedAt,
}

impl CollectionItem for Translator {
    type SortField = TranslatorSortField;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(ref language) = self.language_name {
            fields.push(language);
        }
        fields
    }

    fn compare_by(&self, other: &Self, field: TranslatorSortField) -> Ordering {
        match field {
            TranslatorSortField::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            TranslatorSortField::Language => self.language_name.cmp(&other.language_name),
            TranslatorSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}
