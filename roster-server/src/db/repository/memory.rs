//! In-memory employee store
//!
//! Transient backend and test double. One process-owned collection behind a
//! lock, injected wherever the contract is required - no ambient static
//! state.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use shared::models::EmployeeUpdate;

use super::{EmployeeStore, RepoError, RepoResult, new_employee_id};
use crate::db::models::Employee;

/// Thread-safe in-memory store; records keep insertion order
#[derive(Clone, Default)]
pub struct MemoryEmployeeStore {
    records: Arc<RwLock<Vec<Employee>>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, Vec<Employee>>> {
        self.records
            .read()
            .map_err(|_| RepoError::Database("store lock poisoned".to_string()))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, Vec<Employee>>> {
        self.records
            .write()
            .map_err(|_| RepoError::Database("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        Ok(self.read()?.clone())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        Ok(self
            .read()?
            .iter()
            .find(|e| e.id.as_deref() == Some(id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        Ok(self.read()?.iter().find(|e| e.email == email).cloned())
    }

    async fn create(&self, mut employee: Employee) -> RepoResult<Employee> {
        let mut records = self.write()?;
        if records.iter().any(|e| e.email == employee.email) {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                employee.email
            )));
        }
        if employee.id.is_none() {
            employee.id = Some(new_employee_id());
        }
        records.push(employee.clone());
        Ok(employee)
    }

    async fn update_by_id(
        &self,
        id: &str,
        changes: EmployeeUpdate,
    ) -> RepoResult<Option<Employee>> {
        let mut records = self.write()?;

        if let Some(ref new_email) = changes.email
            && records
                .iter()
                .any(|e| e.email == *new_email && e.id.as_deref() != Some(id))
        {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                new_email
            )));
        }

        let Some(record) = records.iter_mut().find(|e| e.id.as_deref() == Some(id)) else {
            return Ok(None);
        };
        record.apply_update(&changes);
        Ok(Some(record.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.write()?.retain(|e| e.id.as_deref() != Some(id));
        Ok(())
    }

    async fn insert_many(&self, employees: Vec<Employee>) -> RepoResult<()> {
        let mut records = self.write()?;
        for mut employee in employees {
            if records.iter().any(|e| e.email == employee.email) {
                continue;
            }
            if employee.id.is_none() {
                employee.id = Some(new_employee_id());
            }
            records.push(employee);
        }
        Ok(())
    }
}
