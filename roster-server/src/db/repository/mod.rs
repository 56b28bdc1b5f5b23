//! Repository module
//!
//! The storage contract for employee records. Two backends implement it -
//! [`SurrealEmployeeStore`] (embedded, durable) and [`MemoryEmployeeStore`]
//! (transient) - and behave identically from the caller's point of view;
//! tests substitute the memory store freely.

pub mod memory;
pub mod surreal;

pub use memory::MemoryEmployeeStore;
pub use surreal::SurrealEmployeeStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::models::Employee;
use shared::models::EmployeeUpdate;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Freshly minted record id
///
/// Simple (hyphen-free) UUIDs keep the id identical in both backends and in
/// token subjects.
pub fn new_employee_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Storage contract for employee records
///
/// Every returned record is a value copy - mutating it never changes stored
/// state. An id with no matching record yields `None` (or a no-op delete),
/// not an error; in the durable backend that includes ids that do not even
/// parse as record keys.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All records, in a stable backend-defined order
    async fn find_all(&self) -> RepoResult<Vec<Employee>>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>>;

    /// Persist a new record, assigning its id
    ///
    /// Fails with [`RepoError::Duplicate`] when the email is already taken.
    async fn create(&self, employee: Employee) -> RepoResult<Employee>;

    /// Partial update: only supplied fields change
    ///
    /// `None` when no record matches the id. Changing the email to one
    /// already taken by another record fails with [`RepoError::Duplicate`].
    async fn update_by_id(
        &self,
        id: &str,
        changes: EmployeeUpdate,
    ) -> RepoResult<Option<Employee>>;

    /// Idempotent: deleting a missing id is not an error
    async fn delete_by_id(&self, id: &str) -> RepoResult<()>;

    /// Bulk load for seeding; non-transactional, duplicates are skipped
    async fn insert_many(&self, employees: Vec<Employee>) -> RepoResult<()>;
}
