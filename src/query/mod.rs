//! Typed list queries and the rules for updating them.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::domain::types::{PageLimit, SortDirection};

pub mod builder;
pub mod filters;

pub use builder::{HttpMethod, QueryBuilder, RequestDescriptor};
pub use filters::{ClientFilterSet, CorporateFilters, IndividualFilters};

/// Filter schema of a list endpoint.
pub trait FilterSet: Clone + Debug + Default + PartialEq {
    /// Wire parameters in schema order. Unset filters are left out.
    fn query_pairs(&self) -> Vec<(String, String)>;
}

/// Filter schema of endpoints that accept no filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoFilters;

impl FilterSet for NoFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Free-form `name -> value` filters, rendered in name order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringFilters(BTreeMap<String, String>);

impl StringFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`; a blank value removes the filter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into().trim().to_string();
        if value.is_empty() {
            self.0.remove(&name);
        } else {
            self.0.insert(name, value);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl FilterSet for StringFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        self.0.clone().into_iter().collect()
    }
}

/// Pagination, sort and filters fully determining a list request.
#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery<F> {
    pub offset: usize,
    pub limit: PageLimit,
    pub sort_by: Option<String>,
    pub sort_dir: Option<SortDirection>,
    pub filters: F,
}

impl<F: FilterSet> Default for ListQuery<F> {
    fn default() -> Self {
        Self::new(PageLimit::default())
    }
}

impl<F: FilterSet> ListQuery<F> {
    pub fn new(limit: PageLimit) -> Self {
        Self {
            offset: 0,
            limit,
            sort_by: None,
            sort_dir: None,
            filters: F::default(),
        }
    }

    #[must_use]
    pub fn sorted(mut self, sort_by: impl Into<String>, sort_dir: SortDirection) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_dir = Some(sort_dir);
        self
    }

    #[must_use]
    pub fn at_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn filtered(mut self, filters: F) -> Self {
        self.filters = filters;
        self
    }

    /// Applies `update` on top of this query.
    ///
    /// Changing the filters or the sort moves back to the first page, even if
    /// the update also carries an offset. An offset-only update keeps
    /// everything else.
    pub fn merge(&self, update: QueryUpdate<F>) -> Self {
        let mut next = self.clone();

        if let Some(limit) = update.limit {
            next.limit = limit;
        }
        if let Some(sort_by) = update.sort_by {
            next.sort_by = sort_by;
        }
        if let Some(sort_dir) = update.sort_dir {
            next.sort_dir = sort_dir;
        }
        if let Some(filters) = update.filters {
            next.filters = filters;
        }
        if let Some(offset) = update.offset {
            next.offset = offset;
        }

        let selection_changed = next.sort_by != self.sort_by
            || next.sort_dir != self.sort_dir
            || next.filters != self.filters;
        if selection_changed {
            next.offset = 0;
        }

        next
    }

    /// Offset of the following page.
    pub fn next_offset(&self) -> usize {
        self.offset.saturating_add(self.limit.get())
    }

    /// Offset of the preceding page, clamped at the first one.
    pub fn previous_offset(&self) -> usize {
        self.offset.saturating_sub(self.limit.get())
    }
}

/// Partial [`ListQuery`] merged by `set_query`. Unset fields are kept.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryUpdate<F> {
    offset: Option<usize>,
    limit: Option<PageLimit>,
    sort_by: Option<Option<String>>,
    sort_dir: Option<Option<SortDirection>>,
    filters: Option<F>,
}

impl<F> Default for QueryUpdate<F> {
    fn default() -> Self {
        Self {
            offset: None,
            limit: None,
            sort_by: None,
            sort_dir: None,
            filters: None,
        }
    }
}

impl<F> QueryUpdate<F> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: PageLimit) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(Some(sort_by.into()));
        self
    }

    #[must_use]
    pub fn sort_dir(mut self, sort_dir: SortDirection) -> Self {
        self.sort_dir = Some(Some(sort_dir));
        self
    }

    /// Drops any sort so the server falls back to its default order.
    #[must_use]
    pub fn clear_sort(mut self) -> Self {
        self.sort_by = Some(None);
        self.sort_dir = Some(None);
        self
    }

    #[must_use]
    pub fn filters(mut self, filters: F) -> Self {
        self.filters = Some(filters);
        self
    }
}
