//! Shared types for the roster service
//!
//! Wire-level types used by both the server and its clients:
//! - [`models`] - employee record DTOs and the typed update-field table
//! - [`query`] - filter / sort / pagination shapes
//! - [`client`] - auth request/response DTOs

pub mod client;
pub mod models;
pub mod query;

pub use client::{LoginRequest, LoginResponse, UserInfo};
pub use models::{EmployeeCreate, EmployeeUpdate, EmployeeView, Role, UpdatableField};
pub use query::{EmployeeFilter, EmployeeQuery, Page, SortBy, SortDirection, SortField};
