//! # Repository Module
//!
//! Database repository implementations for the sale engine.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Boundary operation                                                 │
//! │       │  db.sales().create(&sale, &items)                           │
//! │       ▼                                                             │
//! │  SaleRepository                                                     │
//! │  ├── create / get / list / update / delete / receipt_lines          │
//! │       │  SQL, one transaction per logical write                     │
//! │       ▼                                                             │
//! │  SQLite database                                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`sale::SaleRepository`] - sale headers and their line items
//! - [`reference::ReferenceRepository`] - vendors, articles, payment methods

pub mod reference;
pub mod sale;
