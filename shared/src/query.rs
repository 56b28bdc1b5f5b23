//! Query argument shapes
//!
//! The structured request the query engine consumes: filter clauses (ANDed),
//! a single sort key, and offset pagination. Over HTTP these arrive as flat
//! query parameters and are folded into this shape by the handler.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Filter clauses; every clause is optional and all present clauses must hold
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeFilter {
    /// Case-insensitive substring match on `name`
    pub name_contains: Option<String>,
    /// Inclusive lower bound on `age`
    pub min_age: Option<u32>,
    /// Inclusive upper bound on `age`
    pub max_age: Option<u32>,
    /// Exact role match
    pub role: Option<Role>,
    /// Inclusive lower bound on `attendance`
    pub attendance_min: Option<f64>,
    /// Inclusive upper bound on `attendance`
    pub attendance_max: Option<f64>,
}

impl EmployeeFilter {
    pub fn is_empty(&self) -> bool {
        self.name_contains.is_none()
            && self.min_age.is_none()
            && self.max_age.is_none()
            && self.role.is_none()
            && self.attendance_min.is_none()
            && self.attendance_max.is_none()
    }
}

/// Sortable record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Age,
    Class,
    Attendance,
    Role,
    Date,
    Email,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Single sort key; direction defaults to ascending
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortBy {
    pub field: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Full query argument bundle
///
/// With no sort key the result order is descending by `date`. Pagination is
/// 1-indexed; non-positive `page`/`page_size` are clamped to 1 and
/// `page_size` defaults to 10.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeQuery {
    pub filter: Option<EmployeeFilter>,
    pub sort_by: Option<SortBy>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// One page of results
///
/// `total` counts the filtered-but-unpaginated set, so callers can derive
/// the page count as `total.div_ceil(page_size)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Re-shape the items while keeping the pagination envelope
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
