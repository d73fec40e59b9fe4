//! Pagination and sort parameters for catalog searches.
//!
//! Sort keys arrive as untrusted text. They are checked against the
//! caller's safelist by [`validate_filters`], and query construction only
//! ever sees the closed [`SortColumn`] and [`SortDirection`] types.

use std::collections::HashMap;

use crate::error::{CatalogError, Result};
use crate::validator::{Validator, permitted_value};

pub const MAX_PAGE: i64 = 10_000_000;
pub const MAX_PAGE_SIZE: i64 = 100;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const DEFAULT_SORT: &str = "id";

/// Sort keys accepted when listing movies.
pub const MOVIE_SORT_SAFELIST: &[&str] = &[
    "id", "title", "year", "runtime", "-id", "-title", "-year", "-runtime",
];

/// Columns a search may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Title,
    Year,
    Runtime,
}

impl SortColumn {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" => Some(SortColumn::Id),
            "title" => Some(SortColumn::Title),
            "year" => Some(SortColumn::Year),
            "runtime" => Some(SortColumn::Runtime),
            _ => None,
        }
    }

    /// Column identifier as it appears in SQL.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Title => "title",
            SortColumn::Year => "year",
            SortColumn::Runtime => "runtime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
    pub sort_safelist: Vec<String>,
}

impl Filters {
    pub fn new(
        page: i64,
        page_size: i64,
        sort: impl Into<String>,
        sort_safelist: &[&str],
    ) -> Self {
        Self {
            page,
            page_size,
            sort: sort.into(),
            sort_safelist: sort_safelist.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Column named by `sort`, with any leading `-` stripped.
    ///
    /// Fails with [`CatalogError::UnsafeSort`] when `sort` is not on the
    /// safelist or names no known column. Callers must run
    /// [`validate_filters`] first; reaching the error is a bug.
    pub fn sort_column(&self) -> Result<SortColumn> {
        self.ensure_safe_sort()?;
        let key = self.sort.strip_prefix('-').unwrap_or(&self.sort);
        SortColumn::from_key(key)
            .ok_or_else(|| CatalogError::UnsafeSort(self.sort.clone()))
    }

    pub fn sort_direction(&self) -> Result<SortDirection> {
        self.ensure_safe_sort()?;
        if self.sort.starts_with('-') {
            Ok(SortDirection::Descending)
        } else {
            Ok(SortDirection::Ascending)
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    fn ensure_safe_sort(&self) -> Result<()> {
        if permitted_value(&self.sort, &self.sort_safelist) {
            Ok(())
        } else {
            Err(CatalogError::UnsafeSort(self.sort.clone()))
        }
    }
}

pub fn validate_filters(v: &mut Validator, filters: &Filters) {
    v.check(filters.page > 0, "page", "must be greater than zero");
    v.check(
        filters.page <= MAX_PAGE,
        "page",
        "must be a maximum of 10 million",
    );
    v.check(filters.page_size > 0, "page_size", "must be greater than zero");
    v.check(
        filters.page_size <= MAX_PAGE_SIZE,
        "page_size",
        "must be a maximum of 100",
    );
    v.check(
        permitted_value(&filters.sort, &filters.sort_safelist),
        "sort",
        "invalid sort value",
    );
}

/// Search input for listing movies, read from query-string pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieListQuery {
    pub title: String,
    pub genres: Vec<String>,
    pub filters: Filters,
}

impl Default for MovieListQuery {
    fn default() -> Self {
        Self {
            title: String::new(),
            genres: Vec::new(),
            filters: Filters::new(
                DEFAULT_PAGE,
                DEFAULT_PAGE_SIZE,
                DEFAULT_SORT,
                MOVIE_SORT_SAFELIST,
            ),
        }
    }
}

impl MovieListQuery {
    /// Read `title`, `genres`, `page`, `page_size` and `sort`, falling back
    /// to defaults for absent keys. Non-integer page values are recorded on
    /// `v`; range and safelist checks are left to [`validate_filters`].
    pub fn from_query(query: &HashMap<String, String>, v: &mut Validator) -> Self {
        let title = query.get("title").cloned().unwrap_or_default();
        let genres = query
            .get("genres")
            .map(|raw| read_csv(raw))
            .unwrap_or_default();
        let page = read_int(query, "page", DEFAULT_PAGE, v);
        let page_size = read_int(query, "page_size", DEFAULT_PAGE_SIZE, v);
        let sort = query
            .get("sort")
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_SORT.to_string());

        Self {
            title,
            genres,
            filters: Filters::new(page, page_size, sort, MOVIE_SORT_SAFELIST),
        }
    }
}

fn read_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn read_int(
    query: &HashMap<String, String>,
    key: &str,
    default: i64,
    v: &mut Validator,
) -> i64 {
    match query.get(key).filter(|raw| !raw.is_empty()) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            v.add_error(key, "must be an integer value");
            default
        }),
    }
}
