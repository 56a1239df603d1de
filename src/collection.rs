//! In-memory collection views for list endpoints.
//!
//! Every list screen follows the same pattern: the handler loads the full
//! collection for a resource once, seeds a view with it, and the view derives
//! the filtered/searched/sorted rows to return. The derivation is a pure
//! function of (held collection, search term, sort option, status filter) —
//! no I/O, no error states. Resource-specific behaviour (which fields the
//! search term matches, which sort fields exist, what "active" means) comes
//! from the [`CollectionItem`] implementation on the row type.

use std::cmp::Ordering;

use serde::Deserialize;
use utoipa::ToSchema;

/// Sort direction for a collection view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A (field, direction) pair determining display order.
/// Exactly one sort option is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Inclusion predicate narrowing the collection by a status-like attribute.
/// `All` is the identity filter. For resources without a status attribute
/// every item counts as active, so `Inactive` yields an empty view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    fn accepts(self, active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => active,
            StatusFilter::Inactive => !active,
        }
    }
}

/// Per-resource schema for collection views.
///
/// The sort field is an enumerated type, so an unrecognized field is
/// unrepresentable rather than runtime-checked.
pub trait CollectionItem {
    type SortField: Copy;

    /// String attributes matched by the search term
    fn search_fields(&self) -> Vec<&str>;

    /// Compare two items on the given sort field
    fn compare_by(&self, other: &Self, field: Self::SortField) -> Ordering;

    /// Whether the item counts as active for status filtering
    fn is_active(&self) -> bool {
        true
    }
}

/// View controller owning one resource's collection for the current request.
///
/// Seeded wholesale by [`initialize`](CollectionView::initialize) and replaced
/// wholesale after any mutation round-trip; predicates persist across
/// re-seeding. All operations are synchronous; [`view`](CollectionView::view)
/// recomputes from scratch on each call.
pub struct CollectionView<T: CollectionItem> {
    items: Vec<T>,
    search_term: String,
    sort: Option<SortOption<T::SortField>>,
    filter: StatusFilter,
}

impl<T: CollectionItem> Default for CollectionView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CollectionItem> CollectionView<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            search_term: String::new(),
            sort: None,
            filter: StatusFilter::All,
        }
    }

    /// Seed or replace the held collection. No I/O happens here; the caller
    /// fetched the items. Active predicates are kept.
    pub fn initialize(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Set the free-text search term. Any string is legal; empty matches
    /// everything. Matching is case-insensitive substring over the item's
    /// [`search_fields`](CollectionItem::search_fields).
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// Set the active sort option, replacing any previous one
    pub fn set_sort_option(&mut self, option: SortOption<T::SortField>) {
        self.sort = Some(option);
    }

    /// Revert to unspecified sort (held-collection order)
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Set the active status filter
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Indices of the held items passing the filter and search predicates,
    /// sorted by the active sort option. The sort is stable, so items with
    /// equal keys keep their held-collection order in both directions.
    fn selected(&self) -> Vec<usize> {
        let needle = self.search_term.to_lowercase();
        let mut indices: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.filter.accepts(item.is_active()))
            .filter(|(_, item)| {
                needle.is_empty()
                    || item
                        .search_fields()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .map(|(i, _)| i)
            .collect();

        if let Some(sort) = self.sort {
            indices.sort_by(|&a, &b| {
                let ord = self.items[a].compare_by(&self.items[b], sort.field);
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        indices
    }

    /// Derive the current view. Pure and total; an empty result is an empty
    /// sequence, never an error.
    pub fn view(&self) -> Vec<&T> {
        self.selected().into_iter().map(|i| &self.items[i]).collect()
    }

    /// Derive the current view, consuming the controller. Used by list
    /// handlers that hand the rows straight to serialization.
    pub fn into_view(self) -> Vec<T> {
        let order = self.selected();
        let mut slots: Vec<Option<T>> = self.items.into_iter().map(Some).collect();
        order.into_iter().filter_map(|i| slots[i].take()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Query parameters accepted by every list endpoint. Unknown `sort_by` or
/// `status` values are rejected during deserialization, before they can
/// reach a view.
#[derive(Debug, Deserialize)]
pub struct CollectionQuery<F> {
    pub search: Option<String>,
    pub sort_by: Option<F>,
    pub sort_dir: Option<SortDirection>,
    pub status: Option<StatusFilter>,
}

impl<F: Copy> CollectionQuery<F> {
    /// Apply the requested predicates to a view
    pub fn apply<T>(&self, view: &mut CollectionView<T>)
    where
        T: CollectionItem<SortField = F>,
    {
        if let Some(ref term) = self.search {
            view.set_search_term(term);
        }
        if let Some(field) = self.sort_by {
            view.set_sort_option(SortOption {
                field,
                direction: self.sort_dir.unwrap_or_default(),
            });
        }
        if let Some(status) = self.status {
            view.set_status_filter(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
        CreatedAt,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        name: String,
        created_at: DateTime<Utc>,
        active: bool,
    }

    impl CollectionItem for Entry {
        type SortField = Field;

        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name]
        }

        fn compare_by(&self, other: &Self, field: Field) -> Ordering {
            match field {
                Field::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
                Field::CreatedAt => self.created_at.cmp(&other.created_at),
            }
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn entry(name: &str, year: i32, active: bool) -> Entry {
        Entry {
            name: name.to_string(),
            created_at: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
            active,
        }
    }

    fn names(view: &[&Entry]) -> Vec<String> {
        view.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn default_predicates_return_collection_in_held_order() {
        let mut view = CollectionView::new();
        view.initialize(vec![entry("Zeta", 2023, true), entry("Alpha", 2024, true)]);

        assert_eq!(names(&view.view()), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn sort_by_name_ascending() {
        let mut view = CollectionView::new();
        view.initialize(vec![entry("Zeta", 2023, true), entry("Alpha", 2024, true)]);
        view.set_sort_option(SortOption {
            field: Field::Name,
            direction: SortDirection::Asc,
        });

        assert_eq!(names(&view.view()), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn sort_by_created_at_descending() {
        let mut view = CollectionView::new();
        view.initialize(vec![
            entry("Old", 2020, true),
            entry("New", 2024, true),
            entry("Mid", 2022, true),
        ]);
        view.set_sort_option(SortOption {
            field: Field::CreatedAt,
            direction: SortDirection::Desc,
        });

        assert_eq!(names(&view.view()), vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut view = CollectionView::new();
        view.initialize(vec![entry("Zeta", 2023, true), entry("Alpha", 2024, true)]);
        view.set_search_term("zet");

        assert_eq!(names(&view.view()), vec!["Zeta"]);

        view.set_search_term("ALPH");
        assert_eq!(names(&view.view()), vec!["Alpha"]);
    }

    #[test]
    fn empty_search_term_matches_everything() {
        let mut view = CollectionView::new();
        view.initialize(vec![entry("A", 2023, true), entry("B", 2024, true)]);
        view.set_search_term("b");
        view.set_search_term("");

        assert_eq!(view.view().len(), 2);
    }

    #[test]
    fn search_miss_yields_empty_view_not_error() {
        let mut view = CollectionView::new();
        view.initialize(vec![entry("Zeta", 2023, true)]);
        view.set_search_term("nothing matches this");

        assert!(view.view().is_empty());
    }

    #[test]
    fn inactive_filter_on_all_active_collection_is_empty() {
        let mut view = CollectionView::new();
        view.initialize(vec![entry("A", 2023, true), entry("B", 2024, true)]);
        view.set_status_filter(StatusFilter::Inactive);

        assert!(view.view().is_empty());
    }

    #[test]
    fn status_filter_partitions_the_collection() {
        let mut view = CollectionView::new();
        view.initialize(vec![
            entry("Active1", 2023, true),
            entry("Blocked", 2023, false),
            entry("Active2", 2024, true),
        ]);

        view.set_status_filter(StatusFilter::Active);
        assert_eq!(names(&view.view()), vec!["Active1", "Active2"]);

        view.set_status_filter(StatusFilter::Inactive);
        assert_eq!(names(&view.view()), vec!["Blocked"]);

        view.set_status_filter(StatusFilter::All);
        assert_eq!(view.view().len(), 3);
    }

    #[test]
    fn sort_is_stable_on_equal_keys() {
        let mut view = CollectionView::new();
        // Same created_at year; held order must survive the sort.
        view.initialize(vec![
            entry("First", 2023, true),
            entry("Second", 2023, true),
            entry("Third", 2023, true),
        ]);
        view.set_sort_option(SortOption {
            field: Field::CreatedAt,
            direction: SortDirection::Asc,
        });
        assert_eq!(names(&view.view()), vec!["First", "Second", "Third"]);

        // Reversing direction reverses key order, not tie order.
        view.set_sort_option(SortOption {
            field: Field::CreatedAt,
            direction: SortDirection::Desc,
        });
        assert_eq!(names(&view.view()), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn predicates_compose() {
        let mut view = CollectionView::new();
        view.initialize(vec![
            entry("Alpha Press", 2023, true),
            entry("alpha archive", 2021, false),
            entry("Alphabet House", 2022, true),
            entry("Beta Books", 2024, true),
        ]);
        view.set_search_term("alpha");
        view.set_status_filter(StatusFilter::Active);
        view.set_sort_option(SortOption {
            field: Field::CreatedAt,
            direction: SortDirection::Asc,
        });

        assert_eq!(names(&view.view()), vec!["Alphabet House", "Alpha Press"]);
    }

    #[test]
    fn reinitialize_replaces_collection_and_keeps_predicates() {
        let mut view = CollectionView::new();
        view.initialize(vec![entry("Zeta", 2023, true)]);
        view.set_search_term("new");
        assert!(view.view().is_empty());

        // A mutation round-trip re-seeds the view; the search box is still
        // filled in, so the predicate applies to the fresh rows.
        view.initialize(vec![entry("Newcomer", 2024, true), entry("Zeta", 2023, true)]);
        assert_eq!(names(&view.view()), vec!["Newcomer"]);
    }

    #[test]
    fn empty_collection_yields_empty_view() {
        let view: CollectionView<Entry> = CollectionView::new();
        assert!(view.view().is_empty());
        assert!(view.is_empty());
    }

    #[test]
    fn clear_sort_reverts_to_held_order() {
        let mut view = CollectionView::new();
        view.initialize(vec![entry("Zeta", 2023, true), entry("Alpha", 2024, true)]);
        view.set_sort_option(SortOption {
            field: Field::Name,
            direction: SortDirection::Asc,
        });
        assert_eq!(names(&view.view()), vec!["Alpha", "Zeta"]);

        view.clear_sort();
        assert_eq!(names(&view.view()), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn into_view_matches_borrowed_view() {
        let mut view = CollectionView::new();
        view.initialize(vec![
            entry("Gamma", 2023, true),
            entry("Alpha", 2024, true),
            entry("Beta", 2022, false),
        ]);
        view.set_sort_option(SortOption {
            field: Field::Name,
            direction: SortDirection::Asc,
        });

        let borrowed = names(&view.view());
        let owned: Vec<String> = view.into_view().into_iter().map(|e| e.name).collect();
        assert_eq!(borrowed, owned);
    }

    #[test]
    fn query_apply_sets_all_predicates() {
        let query: CollectionQuery<Field> = CollectionQuery {
            search: Some("a".to_string()),
            sort_by: Some(Field::Name),
            sort_dir: Some(SortDirection::Desc),
            status: Some(StatusFilter::Active),
        };

        let mut view = CollectionView::new();
        view.initialize(vec![
            entry("Alpha", 2023, true),
            entry("Beta", 2024, true),
            entry("Arcadia", 2022, false),
        ]);
        query.apply(&mut view);

        assert_eq!(names(&view.view()), vec!["Beta", "Alpha"]);
    }
}
