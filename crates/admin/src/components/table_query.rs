//! Filter, sort and paginate pipeline for in-memory record tables.
//!
//! A [`TableQuery`] holds the query state of one table (search text, active
//! filters, sort field and requested page). [`TableQuery::apply`] is pure: it
//! never mutates the collection and returns the same [`TablePage`] for the
//! same inputs.
//!
//! Unlike a bare query struct, the setters here own the page-reset rule:
//! any change to the search text or filters moves the query back to page 1,
//! so a narrowed result set never leaves the table on a page past its end.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;

/// Filter value meaning "no constraint".
pub const FILTER_ALL: &str = "all";

/// A record that can be shown in a data table.
pub trait Record {
    /// Identifier type, unique within a collection.
    type Id: Clone + Eq + Display + From<String>;

    /// Sort fields available for this collection.
    type SortField: SortField;

    /// Stable identifier.
    fn id(&self) -> &Self::Id;

    /// Wire value of a named field, as used by filters and CSV columns.
    ///
    /// Returns `None` for names the record does not have.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Free-text fields matched by the table's search box.
    fn search_fields(&self) -> Vec<&str>;
}

/// A sortable column of some record type.
///
/// Sorting is always descending on the field's string value, so the
/// most recent date comes first.
pub trait SortField: Copy + Default + PartialEq {
    /// Name of the record field compared when sorting.
    fn key(self) -> &'static str;
}

/// Query state for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery<S> {
    search: String,
    filters: BTreeMap<String, String>,
    sort: S,
    page: usize,
    page_size: usize,
}

impl<S: SortField> TableQuery<S> {
    /// Create an empty query on page 1.
    ///
    /// A `page_size` of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            sort: S::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current search text, as entered.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Active filters (field name to required value).
    #[must_use]
    pub const fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Active value for one filter, if constrained.
    #[must_use]
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Current sort field.
    #[must_use]
    pub const fn sort(&self) -> S {
        self.sort
    }

    /// Requested page (1-based, not yet clamped).
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the search text. Returns `true` if the page was reset.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if search == self.search {
            return false;
        }
        self.search = search;
        self.reset_page()
    }

    /// Set one filter. An empty value or `"all"` removes the constraint.
    ///
    /// Returns `true` if the filter state changed (and the page was reset).
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        let changed = if value.is_empty() || value == FILTER_ALL {
            self.filters.remove(&key).is_some()
        } else {
            self.filters.insert(key, value.clone()).as_ref() != Some(&value)
        };
        changed && self.reset_page()
    }

    /// Remove every filter. Returns `true` if any was active.
    pub fn clear_filters(&mut self) -> bool {
        if self.filters.is_empty() {
            return false;
        }
        self.filters.clear();
        self.reset_page()
    }

    /// Change the sort field. The page is kept.
    pub fn set_sort(&mut self, sort: S) {
        self.sort = sort;
    }

    /// Request a page. Out-of-range values are clamped by [`Self::apply`].
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    fn reset_page(&mut self) -> bool {
        self.page = 1;
        true
    }

    /// Whether a record satisfies every active filter and the search text.
    #[must_use]
    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Record<SortField = S>,
    {
        let filters_ok = self
            .filters
            .iter()
            .all(|(key, want)| record.field(key).is_some_and(|have| have == want.as_str()));
        if !filters_ok {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Filtered and sorted records, without pagination.
    ///
    /// This is the set an export serializes.
    #[must_use]
    pub fn filtered<'a, T>(&self, records: &'a [T]) -> Vec<&'a T>
    where
        T: Record<SortField = S>,
    {
        let mut rows: Vec<&T> = records.iter().filter(|r| self.matches(*r)).collect();
        let key = self.sort.key();
        // `sort_by` is stable: equal keys keep their collection order.
        rows.sort_by(|a, b| b.field(key).cmp(&a.field(key)));
        rows
    }

    /// Compute the visible page.
    #[must_use]
    pub fn apply<'a, T>(&self, records: &'a [T]) -> TablePage<&'a T>
    where
        T: Record<SortField = S>,
    {
        TablePage::paginate(self.filtered(records), self.page, self.page_size)
    }
}

/// One page of a filtered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePage<T> {
    /// Rows on this page.
    pub rows: Vec<T>,
    /// Size of the filtered set.
    pub total: usize,
    /// Page shown (1-based, clamped).
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// `max(1, ceil(total / page_size))`.
    pub total_pages: usize,
    /// 1-based index of the first row shown, 0 when empty.
    pub range_start: usize,
    /// 1-based index of the last row shown, 0 when empty.
    pub range_end: usize,
}

impl<T> TablePage<T> {
    /// Slice `rows` into the requested page, clamping it into range.
    #[must_use]
    pub fn paginate(rows: Vec<T>, requested_page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total = rows.len();
        let total_pages = total.div_ceil(page_size).max(1);
        let page = requested_page.clamp(1, total_pages);

        let offset = (page - 1) * page_size;
        let visible: Vec<T> = rows.into_iter().skip(offset).take(page_size).collect();
        let (range_start, range_end) = if visible.is_empty() {
            (0, 0)
        } else {
            (offset + 1, offset + visible.len())
        };

        Self {
            rows: visible,
            total,
            page,
            page_size,
            total_pages,
            range_start,
            range_end,
        }
    }

    /// Transform every row, keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> TablePage<U> {
        TablePage {
            rows: self.rows.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            range_start: self.range_start,
            range_end: self.range_end,
        }
    }
}

impl<T: Clone> TablePage<&T> {
    /// Clone the borrowed rows into an owned page.
    #[must_use]
    pub fn cloned(self) -> TablePage<T> {
        self.map(Clone::clone)
    }
}
