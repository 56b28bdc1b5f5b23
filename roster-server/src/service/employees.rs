//! Employee operations
//!
//! The six operations the service exposes: list, get_one, create, update,
//! delete, login (plus `me` for the caller's own record). Every method takes
//! the caller's principal, gates it through the authorization policy, then
//! delegates to the query engine or the store. All outcomes are tagged
//! results - nothing in here panics or throws for control flow.

use std::sync::Arc;
use std::time::Duration;

use shared::client::{LoginResponse, UserInfo};
use shared::models::{EmployeeCreate, EmployeeUpdate, EmployeeView, UpdatableField};
use shared::query::{EmployeeQuery, Page};
use validator::Validate;

use crate::auth::{CurrentUser, JwtService, policy};
use crate::db::models::Employee;
use crate::db::repository::EmployeeStore;
use crate::query;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Stateless per request; holds the process-wide store and token service
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
    jwt: Arc<JwtService>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>, jwt: Arc<JwtService>) -> Self {
        Self { store, jwt }
    }

    /// List records visible to the caller, filtered/sorted/paginated
    ///
    /// A non-admin's list is row-scoped to their own record before the query
    /// runs, so it is at most a singleton - and empty if their token refers
    /// to a record that has since been deleted.
    pub async fn list(
        &self,
        principal: Option<&CurrentUser>,
        query_args: &EmployeeQuery,
    ) -> AppResult<Page<EmployeeView>> {
        let scope = policy::can_list(principal)?;

        let records = match scope {
            policy::ListScope::All => self.store.find_all().await?,
            policy::ListScope::OwnRecord(id) => {
                self.store.find_by_id(&id).await?.into_iter().collect()
            }
        };

        Ok(query::apply(records, query_args).map(|e| e.view()))
    }

    /// Fetch a single record
    ///
    /// `Ok(None)` means the caller was entitled to ask and no such record
    /// exists. A non-admin asking for someone else's id gets `Forbidden`
    /// whether or not the record exists, so the answer never confirms
    /// existence.
    pub async fn get_one(
        &self,
        principal: Option<&CurrentUser>,
        id: &str,
    ) -> AppResult<Option<EmployeeView>> {
        policy::can_read_one(principal, id)?;
        Ok(self.store.find_by_id(id).await?.map(|e| e.view()))
    }

    /// The caller's own record
    pub async fn me(&self, principal: Option<&CurrentUser>) -> AppResult<EmployeeView> {
        let user = principal.ok_or(AppError::Unauthorized)?;
        self.store
            .find_by_id(&user.id)
            .await?
            .map(|e| e.view())
            .ok_or_else(|| AppError::not_found(format!("Employee {} not found", user.id)))
    }

    /// Create a record (admin only); hashes the plaintext secret
    pub async fn create(
        &self,
        principal: Option<&CurrentUser>,
        input: EmployeeCreate,
    ) -> AppResult<EmployeeView> {
        policy::can_create(principal)?;
        input.validate()?;

        let password_hash = Employee::hash_password(&input.password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
        let employee = Employee::from_create(input, password_hash);

        let created = self.store.create(employee).await.map_err(|e| match e {
            crate::db::repository::RepoError::Duplicate(_) => {
                AppError::conflict("Email already in use")
            }
            other => other.into(),
        })?;

        tracing::info!(
            id = %created.id.as_deref().unwrap_or_default(),
            email = %created.email,
            "Employee created"
        );

        Ok(created.view())
    }

    /// Update a record
    ///
    /// Admins change any field on any record. A caller updating their own
    /// record may only touch the policy's field whitelist; supplying any
    /// other field rejects the whole update - a caller attempting to change
    /// disallowed fields must be told, not ignored.
    pub async fn update(
        &self,
        principal: Option<&CurrentUser>,
        id: &str,
        input: EmployeeUpdate,
    ) -> AppResult<EmployeeView> {
        let grant = policy::can_update(principal, id)?;
        input.validate()?;

        if let policy::UpdateGrant::Restricted(allowed) = grant {
            let disallowed: Vec<UpdatableField> = input
                .supplied_fields()
                .into_iter()
                .filter(|f| !allowed.contains(f))
                .collect();
            if !disallowed.is_empty() {
                return Err(AppError::forbidden(format!(
                    "Fields not permitted on your own record: {}",
                    disallowed
                        .iter()
                        .map(|f| f.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
        }

        let updated = self
            .store
            .update_by_id(id, input)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;

        Ok(updated.view())
    }

    /// Delete a record (admin only); idempotent once authorized
    pub async fn delete(&self, principal: Option<&CurrentUser>, id: &str) -> AppResult<()> {
        policy::can_delete(principal)?;
        self.store.delete_by_id(id).await?;
        tracing::info!(id = %id, "Employee deleted");
        Ok(())
    }

    /// Authenticate by email and password
    ///
    /// An unknown email and a wrong password produce the same failure, so
    /// the response leaks nothing about which part was wrong. On success the
    /// caller gets a token carrying `{id, role, name}` and a redacted user
    /// view - never the hash.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let employee = self.store.find_by_email(email).await?;

        // Fixed delay to blunt timing probes (before checking the result)
        tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

        let employee = match employee {
            Some(e) => e,
            None => {
                tracing::warn!(email = %email, "Login failed - user not found");
                return Err(AppError::invalid_credentials());
            }
        };

        let password_valid = employee
            .verify_password(password)
            .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

        if !password_valid {
            tracing::warn!(email = %email, "Login failed - invalid credentials");
            return Err(AppError::invalid_credentials());
        }

        let user = CurrentUser {
            id: employee.id.clone().unwrap_or_default(),
            name: employee.name.clone(),
            role: employee.role,
        };

        let token = self
            .jwt
            .generate_token(&user)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

        tracing::info!(
            id = %user.id,
            email = %employee.email,
            role = %user.role,
            "User logged in"
        );

        Ok(LoginResponse {
            token,
            user: UserInfo {
                id: user.id,
                name: user.name,
                role: user.role,
            },
        })
    }
}
