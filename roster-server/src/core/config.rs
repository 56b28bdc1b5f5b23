//! Server configuration

use crate::auth::JwtConfig;

/// Which repository backend to open at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Embedded SurrealDB under the data directory
    Disk,
    /// Transient in-memory store
    Memory,
}

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | ROSTER_DATA_DIR | ./data | Durable store location |
/// | HTTP_PORT | 3003 | HTTP API port |
/// | STORE_BACKEND | disk | `disk` or `memory` |
/// | SEED_DEMO_DATA | false | Seed 50 demo employees on startup |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET | (generated in debug builds) | Signing secret, min 32 chars |
/// | JWT_EXPIRATION_MINUTES | 120 | Token lifetime |
/// | JWT_ISSUER | roster-server | Token issuer |
/// | JWT_AUDIENCE | roster-clients | Token audience |
///
/// # Example
///
/// ```ignore
/// ROSTER_DATA_DIR=/var/lib/roster HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the durable store
    pub data_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Repository backend to open at startup
    pub store_backend: StoreBackend,
    /// Seed synthetic employees on startup
    pub seed_demo_data: bool,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("ROSTER_DATA_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3003),
            store_backend: match std::env::var("STORE_BACKEND").as_deref() {
                Ok("memory") => StoreBackend::Memory,
                _ => StoreBackend::Disk,
            },
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
        }
    }
}
