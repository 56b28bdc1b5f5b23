//! Database layer
//!
//! The domain model and the repository contract with its two backends
//! (embedded SurrealDB, transient in-memory).

pub mod models;
pub mod repository;

pub use models::Employee;
pub use repository::{EmployeeStore, MemoryEmployeeStore, RepoError, RepoResult, SurrealEmployeeStore};
