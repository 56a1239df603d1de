//! Book model and related types

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::collection::CollectionItem;

/// Full book model from database. Related display names (author, publisher,
/// category) are joined into the row so list views can search and sort on
/// them without extra round-trips.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub publisher_id: Option<i32>,
    pub category_id: Option<i32>,
    pub language_id: Option<i32>,
    pub format_id: Option<i32>,
    pub translator_id: Option<i32>,
    pub pages: Option<i32>,
    pub publication_year: Option<i32>,
    pub summary: Option<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub author_name: Option<String>,
    pub publisher_name: Option<String>,
    pub category_name: Option<String>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 10, max = 17))]
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub publisher_id: Option<i32>,
    pub category_id: Option<i32>,
    pub language_id: Option<i32>,
    pub format_id: Option<i32>,
    pub translator_id: Option<i32>,
    #[validate(range(min = 1, max = 20000))]
    pub pages: Option<i32>,
    #[validate(range(min = 0, max = 2100))]
    pub publication_year: Option<i32>,
    #[validate(length(max = 8000))]
    pub summary: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Update book request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    #[validate(length(min = 10, max = 17))]
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub publisher_id: Option<i32>,
    pub category_id: Option<i32>,
    pub language_id: Option<i32>,
    pub format_id: Option<i32>,
    pub translator_id: Option<i32>,
    #[validate(range(min = 1, max = 20000))]
    pub pages: Option<i32>,
    #[validate(range(min = 0, max = 2100))]
    pub publication_year: Option<i32>,
    #[validate(length(max = 8000))]
    pub summary: Option<String>,
    pub available: Option<bool>,
}

/// Sort fields available on book list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookSortField {
    Title,
    Isbn,
    Author,
    Publisher,
    PublicationYear,
    CreatedAt,
}

impl CollectionItem for Book {
    type SortField = BookSortField;

    /// Books match the search term on title, ISBN, author name, and
    /// publisher name.
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(ref isbn) = self.isbn {
            fields.push(isbn);
        }
        if let Some(ref author) = self.author_name {
            fields.push(author);
        }
        if let Some(ref publisher) = self.publisher_name {
            fields.push(publisher);
        }
        fields
    }

    fn compare_by(&self, other: &Self, field: BookSortField) -> Ordering {
        match field {
            BookSortField::Title => self.title.to_lowercase().cmp(&other.title.to_lowercase()),
            BookSortField::Isbn => self.isbn.cmp(&other.isbn),
            BookSortField::Author => compare_optional_names(&self.author_name, &other.author_name),
            BookSortField::Publisher => {
                compare_optional_names(&self.publisher_name, &other.publisher_name)
            }
            BookSortField::PublicationYear => self.publication_year.cmp(&other.publication_year),
            BookSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    fn is_active(&self) -> bool {
        self.available
    }
}

fn compare_optional_names(a: &Option<String>, b: &Option<String>) -> Ordering {
    let a = a.as_deref().map(str::to_lowercase);
    let b = b.as_deref().map(str::to_lowercase);
    a.cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{CollectionView, SortDirection, SortOption, StatusFilter};
    use chrono::TimeZone;

    fn book(title: &str, author: Option<&str>, isbn: Option<&str>, available: bool) -> Book {
        Book {
            id: 0,
            title: title.to_string(),
            slug: title.to_lowercase(),
            isbn: isbn.map(String::from),
            author_id: None,
            publisher_id: None,
            category_id: None,
            language_id: None,
            format_id: None,
            translator_id: None,
            pages: None,
            publication_year: None,
            summary: None,
            available,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
            author_name: author.map(String::from),
            publisher_name: Some("Ace Books".to_string()),
            category_name: None,
        }
    }

    #[test]
    fn search_matches_author_and_isbn() {
        let mut view = CollectionView::new();
        view.initialize(vec![
            book("Dune", Some("Frank Herbert"), Some("9780441013593"), true),
            book("Solaris", Some("Stanislaw Lem"), None, true),
        ]);

        view.set_search_term("herbert");
        assert_eq!(view.view().len(), 1);
        assert_eq!(view.view()[0].title, "Dune");

        view.set_search_term("0441");
        assert_eq!(view.view().len(), 1);

        // Publisher name is searchable too.
        view.set_search_term("ace books");
        assert_eq!(view.view().len(), 2);
    }

    #[test]
    fn status_filter_tracks_availability() {
        let mut view = CollectionView::new();
        view.initialize(vec![
            book("Dune", None, None, true),
            book("Withdrawn", None, None, false),
        ]);
        view.set_status_filter(StatusFilter::Inactive);

        let rows = view.view();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Withdrawn");
    }

    #[test]
    fn sort_by_author_puts_missing_names_first() {
        let mut view = CollectionView::new();
        view.initialize(vec![
            book("B", Some("Zelazny"), None, true),
            book("A", None, None, true),
            book("C", Some("Asimov"), None, true),
        ]);
        view.set_sort_option(SortOption {
            field: BookSortField::Author,
            direction: SortDirection::Asc,
        });

        let titles: Vec<&str> = view.view().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C", "B"]);
    }
}
