//! # verdu-db: Database Layer for Verdu POS
//!
//! SQLite persistence for the sale engine, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Verdu POS Data Flow                           │
//! │                                                                     │
//! │  Boundary operation (CreateSale, Report, ...)                       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    verdu-db (THIS CRATE)                      │  │
//! │  │                                                               │  │
//! │  │  ┌─────────────┐   ┌────────────────┐   ┌──────────────┐     │  │
//! │  │  │  Database   │   │  Repositories  │   │  Migrations  │     │  │
//! │  │  │  (pool.rs)  │◄──│ sale / report  │   │  (embedded)  │     │  │
//! │  │  │ SqlitePool  │   │ / reference    │   │ 001_init.sql │     │  │
//! │  │  └─────────────┘   └────────────────┘   └──────────────┘     │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite file (WAL mode, foreign keys on)                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The one rule that matters
//!
//! A sale is a header plus a variable-length list of items, and the two
//! are never visible half-written. Every multi-row write in this crate
//! runs inside a single transaction; a failure mid-way rolls the whole
//! sale back.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use verdu_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/verdu.db")).await?;
//! let sale = db.sales().get(42).await?;
//! let report = db.reports().aggregate(from, to).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod report;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use report::ReportRepository;
pub use repository::reference::ReferenceRepository;
pub use repository::sale::SaleRepository;
