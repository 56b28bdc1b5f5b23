//! Embedded SurrealDB employee store
//!
//! Durable backend. Record keys are the public employee ids (simple UUIDs),
//! so `type::thing('employee', $id)` addresses a record directly and an id
//! that matches nothing - parseable or not - simply selects nothing.

use async_trait::async_trait;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use super::{EmployeeStore, RepoError, RepoResult, new_employee_id};
use crate::db::models::Employee;
use shared::models::{EmployeeUpdate, Role};

/// Row shape written to the database (no id; the record key carries it)
///
/// Timestamps are persisted as epoch milliseconds.
#[derive(Debug, Serialize)]
struct EmployeeContent {
    name: String,
    age: u32,
    class: Option<String>,
    subjects: Vec<String>,
    attendance: f64,
    role: Role,
    avatar: Option<String>,
    date: i64,
    email: String,
    flagged: bool,
    password_hash: String,
}

impl From<&Employee> for EmployeeContent {
    fn from(e: &Employee) -> Self {
        Self {
            name: e.name.clone(),
            age: e.age,
            class: e.class.clone(),
            subjects: e.subjects.clone(),
            attendance: e.attendance,
            role: e.role,
            avatar: e.avatar.clone(),
            date: e.date.timestamp_millis(),
            email: e.email.clone(),
            flagged: e.flagged,
            password_hash: e.password_hash.clone(),
        }
    }
}

/// Row shape read back; `key` is projected via `record::id(id)`
#[derive(Debug, Deserialize)]
struct EmployeeRow {
    key: String,
    name: String,
    age: u32,
    class: Option<String>,
    subjects: Vec<String>,
    attendance: f64,
    role: Role,
    avatar: Option<String>,
    date: i64,
    email: String,
    flagged: bool,
    password_hash: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: Some(row.key),
            name: row.name,
            age: row.age,
            class: row.class,
            subjects: row.subjects,
            attendance: row.attendance,
            role: row.role,
            avatar: row.avatar,
            date: DateTime::from_timestamp_millis(row.date).unwrap_or_default(),
            email: row.email,
            flagged: row.flagged,
            password_hash: row.password_hash,
        }
    }
}

const SELECT_FIELDS: &str = "*, record::id(id) AS key";

/// Durable employee store over embedded SurrealDB (RocksDB engine)
#[derive(Clone)]
pub struct SurrealEmployeeStore {
    db: Surreal<Db>,
}

impl SurrealEmployeeStore {
    /// Open (or create) the database under `data_dir`
    pub async fn open(data_dir: &str) -> RepoResult<Self> {
        let path = std::path::Path::new(data_dir).join("roster.db");
        let db = Surreal::new::<RocksDb>(path).await?;
        db.use_ns("roster").use_db("roster").await?;
        Ok(Self { db })
    }
}

#[async_trait]
impl EmployeeStore for SurrealEmployeeStore {
    async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {} FROM employee ORDER BY email",
                SELECT_FIELDS
            ))
            .await?;
        let rows: Vec<EmployeeRow> = result.take(0)?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {} FROM type::thing('employee', $id)",
                SELECT_FIELDS
            ))
            .bind(("id", id.to_string()))
            .await?;
        let rows: Vec<EmployeeRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(Employee::from))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {} FROM employee WHERE email = $email LIMIT 1",
                SELECT_FIELDS
            ))
            .bind(("email", email.to_string()))
            .await?;
        let rows: Vec<EmployeeRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(Employee::from))
    }

    async fn create(&self, mut employee: Employee) -> RepoResult<Employee> {
        // Check duplicate email
        if self.find_by_email(&employee.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                employee.email
            )));
        }

        let id = employee.id.take().unwrap_or_else(new_employee_id);
        let content = EmployeeContent::from(&employee);

        self.db
            .query("CREATE type::thing('employee', $id) CONTENT $data RETURN NONE")
            .bind(("id", id.clone()))
            .bind(("data", content))
            .await?
            .check()?;

        employee.id = Some(id);
        Ok(employee)
    }

    async fn update_by_id(
        &self,
        id: &str,
        changes: EmployeeUpdate,
    ) -> RepoResult<Option<Employee>> {
        let Some(mut employee) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        // Check duplicate email if changing
        if let Some(ref new_email) = changes.email
            && new_email != &employee.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                new_email
            )));
        }

        employee.apply_update(&changes);
        let content = EmployeeContent::from(&employee);

        self.db
            .query("UPDATE type::thing('employee', $id) CONTENT $data RETURN NONE")
            .bind(("id", id.to_string()))
            .bind(("data", content))
            .await?
            .check()?;

        Ok(Some(employee))
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.db
            .query("DELETE type::thing('employee', $id)")
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    async fn insert_many(&self, employees: Vec<Employee>) -> RepoResult<()> {
        for employee in employees {
            match self.create(employee).await {
                Ok(_) => {}
                // Partial success is acceptable for bulk seeding
                Err(RepoError::Duplicate(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
