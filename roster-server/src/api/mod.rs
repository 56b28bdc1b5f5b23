//! API route modules
//!
//! - [`health`] - health check
//! - [`auth`] - login and current-user endpoints
//! - [`employees`] - employee record endpoints

pub mod auth;
pub mod employees;
pub mod health;
