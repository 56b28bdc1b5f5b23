//! Employee API handlers
//!
//! Thin wrappers: fold the flat query parameters into the structured query
//! shape and delegate to [`crate::service::EmployeeService`].

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{EmployeeCreate, EmployeeUpdate, EmployeeView, Role};
use shared::query::{EmployeeFilter, EmployeeQuery, Page, SortBy, SortDirection, SortField};

use crate::auth::AuthContext;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Flat query parameters accepted by the list endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    name_contains: Option<String>,
    min_age: Option<u32>,
    max_age: Option<u32>,
    role: Option<Role>,
    attendance_min: Option<f64>,
    attendance_max: Option<f64>,
    sort_field: Option<SortField>,
    sort_direction: Option<SortDirection>,
    page: Option<u32>,
    page_size: Option<u32>,
}

impl ListParams {
    fn into_query(self) -> EmployeeQuery {
        let filter = EmployeeFilter {
            name_contains: self.name_contains,
            min_age: self.min_age,
            max_age: self.max_age,
            role: self.role,
            attendance_min: self.attendance_min,
            attendance_max: self.attendance_max,
        };

        EmployeeQuery {
            filter: (!filter.is_empty()).then_some(filter),
            sort_by: self.sort_field.map(|field| SortBy {
                field,
                direction: self.sort_direction.unwrap_or_default(),
            }),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// List employees visible to the caller
pub async fn list(
    State(state): State<ServerState>,
    AuthContext(user): AuthContext,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<EmployeeView>>> {
    let page = state
        .employees
        .list(user.as_ref(), &params.into_query())
        .await?;
    Ok(Json(page))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    AuthContext(user): AuthContext,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeView>> {
    let employee = state
        .employees
        .get_one(user.as_ref(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    AuthContext(user): AuthContext,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<EmployeeView>> {
    let employee = state.employees.create(user.as_ref(), payload).await?;
    Ok(Json(employee))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    AuthContext(user): AuthContext,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<EmployeeView>> {
    let employee = state.employees.update(user.as_ref(), &id, payload).await?;
    Ok(Json(employee))
}

/// Delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    AuthContext(user): AuthContext,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.employees.delete(user.as_ref(), &id).await?;
    Ok(Json(true))
}
