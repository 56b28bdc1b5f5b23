//! Service layer - the exposed operations
//!
//! Transport-independent composition of policy, query engine and store.

pub mod employees;

pub use employees::EmployeeService;
