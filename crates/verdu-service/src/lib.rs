//! # verdu-service: Boundary Operations for Verdu POS
//!
//! Orchestration layer tying the pure core, the SQLite repositories and
//! the printer dispatcher into the engine's public operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  transport (HTTP, IPC, CLI - not in this workspace)                 │
//! │       │ typed inputs / ServiceError                                 │
//! │       ▼                                                             │
//! │  ★ verdu-service (THIS CRATE) ★                                     │
//! │  ├── sales      SalesService: CRUD, Report, Reprint                 │
//! │  ├── error      ServiceError taxonomy                               │
//! │  ├── config     ServiceConfig from environment                      │
//! │  └── telemetry  tracing init                                        │
//! │       │                                                             │
//! │       ├──► verdu-core   (validation, receipt rendering)             │
//! │       ├──► verdu-db     (repositories, transactions)                │
//! │       └──► verdu-print  (fire-and-forget dispatch)                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bootstrapping
//!
//! ```rust,no_run
//! use verdu_service::{bootstrap, ServiceConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::from_env()?;
//! let service = bootstrap(&config).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod sales;
pub mod telemetry;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use sales::{
    CreateSaleInput, ReportQuery, ReprintAck, ReprintRequest, SalesService, UpdateSaleInput,
};
pub use telemetry::init_tracing;

use verdu_db::{Database, DbConfig, DbError};
use verdu_print::PrintClient;

/// Errors during service bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    /// The database could not be opened or migrated.
    #[error("database bootstrap failed: {0}")]
    Db(#[from] DbError),
}

/// Opens the database, wires the printer client and returns a ready
/// [`SalesService`].
pub async fn bootstrap(config: &ServiceConfig) -> Result<SalesService, BootError> {
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    let printer = PrintClient::new(&config.printer_url, config.printer_timeout);
    Ok(SalesService::new(db, printer, &config.store_name))
}
