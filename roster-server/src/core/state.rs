//! Server state
//!
//! Holds the process-wide handles: configuration, the repository (opened
//! once, shared behind `Arc`), the JWT service and the employee operations.
//! Cloning is shallow.

use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::config::{Config, StoreBackend};
use crate::db::repository::{EmployeeStore, MemoryEmployeeStore, SurrealEmployeeStore};
use crate::seed;
use crate::service::EmployeeService;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Repository handle - acquired once, held for the process lifetime
    pub store: Arc<dyn EmployeeStore>,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Employee operations
    pub employees: EmployeeService,
    /// Name of the active backend (for the health endpoint)
    pub backend: &'static str,
}

impl ServerState {
    /// Open the store, build services and seed startup data
    ///
    /// When the durable store cannot be opened the server falls back to the
    /// transient in-memory backend with a warning rather than refusing to
    /// start.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let (store, backend): (Arc<dyn EmployeeStore>, &'static str) = match config.store_backend {
            StoreBackend::Memory => {
                tracing::info!("Using transient in-memory store");
                (Arc::new(MemoryEmployeeStore::new()), "memory")
            }
            StoreBackend::Disk => match SurrealEmployeeStore::open(&config.data_dir).await {
                Ok(store) => {
                    tracing::info!(data_dir = %config.data_dir, "Durable store opened");
                    (Arc::new(store), "surrealdb")
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Durable store unavailable, falling back to in-memory store"
                    );
                    (Arc::new(MemoryEmployeeStore::new()), "memory")
                }
            },
        };

        seed::ensure_default_admin(store.as_ref()).await?;
        if config.seed_demo_data {
            seed::seed_demo_data(store.as_ref(), 50).await?;
        }

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let employees = EmployeeService::new(store.clone(), jwt_service.clone());

        Ok(Self {
            config: config.clone(),
            store,
            jwt_service,
            employees,
            backend,
        })
    }
}
