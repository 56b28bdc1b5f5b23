//! Query engine
//!
//! Pure filter/sort/paginate over an already-materialized record collection.
//! Running on materialized records keeps the semantics identical for every
//! storage backend, which is why this lives apart from the repository.
//!
//! - Filter clauses are ANDed; numeric bounds are inclusive; the name match
//!   is a case-insensitive substring.
//! - Sorting is stable: equal keys keep their relative input order, and a
//!   descending sort reverses the comparator, never the slice. Without a
//!   sort key the result is ordered by `date` descending.
//! - Pagination is 1-indexed with a default page size of 10. Non-positive
//!   `page`/`page_size` are clamped to 1. An out-of-range page yields empty
//!   items with the correct `total`.

use std::cmp::Ordering;

use shared::query::{EmployeeFilter, EmployeeQuery, Page, SortBy, SortDirection, SortField};

use crate::db::models::Employee;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Apply a query to a record collection
pub fn apply(records: Vec<Employee>, query: &EmployeeQuery) -> Page<Employee> {
    let mut items: Vec<Employee> = match &query.filter {
        Some(filter) => records.into_iter().filter(|e| matches(filter, e)).collect(),
        None => records,
    };

    sort(&mut items, query.sort_by);

    let total = items.len() as u64;
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let start = (page as usize - 1).saturating_mul(page_size as usize);

    let items = if start >= items.len() {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect()
    };

    Page {
        total,
        page,
        page_size,
        items,
    }
}

fn matches(filter: &EmployeeFilter, employee: &Employee) -> bool {
    if let Some(ref needle) = filter.name_contains
        && !employee
            .name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    {
        return false;
    }
    if let Some(min_age) = filter.min_age
        && employee.age < min_age
    {
        return false;
    }
    if let Some(max_age) = filter.max_age
        && employee.age > max_age
    {
        return false;
    }
    if let Some(role) = filter.role
        && employee.role != role
    {
        return false;
    }
    if let Some(min) = filter.attendance_min
        && employee.attendance < min
    {
        return false;
    }
    if let Some(max) = filter.attendance_max
        && employee.attendance > max
    {
        return false;
    }
    true
}

fn sort(items: &mut [Employee], sort_by: Option<SortBy>) {
    let (field, direction) = match sort_by {
        Some(sort_by) => (sort_by.field, sort_by.direction),
        // Default order: newest first
        None => (SortField::Date, SortDirection::Desc),
    };

    items.sort_by(|a, b| {
        let ordering = compare(field, a, b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare(field: SortField, a: &Employee, b: &Employee) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Age => a.age.cmp(&b.age),
        SortField::Class => a.class.cmp(&b.class),
        SortField::Attendance => a.attendance.total_cmp(&b.attendance),
        SortField::Role => a.role.as_str().cmp(b.role.as_str()),
        SortField::Date => a.date.cmp(&b.date),
        SortField::Email => a.email.cmp(&b.email),
    }
}
