//! Publisher model and related types

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::collection::CollectionItem;

/// Full publisher model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Publisher {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub city: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create publisher request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePublisher {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 120))]
    pub city: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}

/// Update publisher request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePublisher {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 120))]
    pub city: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}

/// Sort fields available on publisher list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PublisherSortField {
    Name,
    City,
    CreatedAt,
}

impl CollectionItem for Publisher {
    type SortField = PublisherSortField;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(ref city) = self.city {
            fields.push(city);
        }
        fields
    }

    fn compare_by(&self, other: &Self, field: PublisherSortField) -> Ordering {
        match field {
            PublisherSortField::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            PublisherSortField::City => self.city.cmp(&other.city),
            PublisherSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}
