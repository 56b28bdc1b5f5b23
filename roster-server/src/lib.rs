//! Roster Server - employee record store with RBAC
//!
//! A single-entity record service: employees are stored behind a repository
//! contract (embedded SurrealDB or a transient in-memory store), queried
//! through a pure filter/sort/paginate engine, and guarded by a role-based
//! authorization policy keyed on the caller's JWT identity.
//!
//! # Module structure
//!
//! ```text
//! roster-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── auth/          # JWT service, principal extraction, authorization policy
//! ├── db/            # Models and the repository contract + backends
//! ├── query.rs       # Pure filter/sort/pagination engine
//! ├── service/       # The six exposed operations
//! ├── api/           # HTTP routes and handlers
//! ├── seed.rs        # Default admin + demo data
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod query;
pub mod seed;
pub mod service;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use service::EmployeeService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

// Security logging macro - tagged auth events on the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
