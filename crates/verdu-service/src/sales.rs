//! # Sales Service
//!
//! The boundary operations of the engine: create, read, update and delete
//! sales, aggregate them into reports, and reprint tickets.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  caller                                                             │
//! │    │ typed input                                                    │
//! │    ▼                                                                │
//! │  SalesService ── validate (verdu-core) ── reject before any I/O     │
//! │    │                                                                │
//! │    ├── persist/query ──► verdu-db   (one transaction per write)     │
//! │    └── reprint ───────► verdu-core render ──► verdu-print dispatch  │
//! │                                              (fire and forget)      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation runs before storage is touched, so a rejected request
//! leaves no trace. The one check that needs stored state (total vs
//! items on a header-only update) runs inside the repository's
//! transaction and surfaces here as the same `Validation` error.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use verdu_core::{
    receipt, validate_date_range, validate_sale, NewSale, NewSaleItem, ReceiptLine, SaleSummary,
    SaleWithItems, SalesReport, ValidationError,
};
use verdu_db::Database;
use verdu_print::PrintClient;

use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Boundary Inputs
// =============================================================================

/// Input for recording a sale.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSaleInput {
    /// Header fields; a missing date means "now" (stamped by storage).
    #[serde(flatten)]
    pub sale: NewSale,
    /// Line items; must be non-empty and must sum to the header total.
    pub items: Vec<NewSaleItem>,
}

/// Input for amending a sale.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSaleInput {
    /// Replacement header fields.
    #[serde(flatten)]
    pub sale: NewSale,
    /// `Some` replaces the item set wholesale; `None` leaves it alone
    /// (the new total must then match the stored items).
    pub items: Option<Vec<NewSaleItem>>,
}

/// Inclusive date range for a report.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// What to put on a reprinted ticket.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReprintRequest {
    /// Reprint a recorded sale by id.
    Sale { id: i64 },
    /// Print an ad-hoc line-up that was never persisted (the register's
    /// "print before charging" flow).
    Adhoc { items: Vec<ReceiptLine> },
}

/// Acknowledgement for a dispatched ticket.
#[derive(Debug, Clone, Serialize)]
pub struct ReprintAck {
    /// Number of lines handed to the printer.
    pub lines: usize,
}

// =============================================================================
// Service
// =============================================================================

/// Boundary service for sale transactions and reporting.
#[derive(Debug, Clone)]
pub struct SalesService {
    db: Database,
    printer: PrintClient,
    store_name: String,
}

impl SalesService {
    /// Creates a service over an open database and a printer client.
    pub fn new(db: Database, printer: PrintClient, store_name: impl Into<String>) -> Self {
        SalesService {
            db,
            printer,
            store_name: store_name.into(),
        }
    }

    /// Records a sale atomically and returns it with generated ids.
    #[instrument(skip(self, input), fields(total_cents = input.sale.total_cents))]
    pub async fn create_sale(&self, input: CreateSaleInput) -> ServiceResult<SaleWithItems> {
        validate_sale(input.sale.total_cents, &input.items)?;

        let created = self.db.sales().create(&input.sale, &input.items).await?;
        info!(sale_id = created.sale.id, "sale recorded");
        Ok(created)
    }

    /// Fetches one sale with its line items.
    pub async fn get_sale(&self, id: i64) -> ServiceResult<SaleWithItems> {
        Ok(self.db.sales().get(id).await?)
    }

    /// Lists all sales, newest first, with display names resolved.
    pub async fn list_sales(&self) -> ServiceResult<Vec<SaleSummary>> {
        Ok(self.db.sales().list().await?)
    }

    /// Amends a sale. Supplying items replaces the set wholesale; omitting
    /// them amends the header only, against the stored items.
    #[instrument(skip(self, input))]
    pub async fn update_sale(&self, id: i64, input: UpdateSaleInput) -> ServiceResult<SaleWithItems> {
        match &input.items {
            Some(items) => validate_sale(input.sale.total_cents, items)?,
            None => {
                if input.sale.total_cents < 0 {
                    return Err(ValidationError::MustBeNonNegative { field: "total" }.into());
                }
            }
        }

        let updated = self
            .db
            .sales()
            .update(id, &input.sale, input.items.as_deref())
            .await?;
        info!(sale_id = id, "sale amended");
        Ok(updated)
    }

    /// Deletes a sale and its line items.
    #[instrument(skip(self))]
    pub async fn delete_sale(&self, id: i64) -> ServiceResult<()> {
        self.db.sales().delete(id).await?;
        info!(sale_id = id, "sale deleted");
        Ok(())
    }

    /// Aggregates sales over an inclusive date range.
    ///
    /// `authorized` is the caller's already-verified permission to read
    /// reports; this layer only enforces it.
    pub async fn report(&self, query: ReportQuery, authorized: bool) -> ServiceResult<SalesReport> {
        if !authorized {
            return Err(ServiceError::Forbidden);
        }
        validate_date_range(query.from, query.to)?;

        Ok(self.db.reports().aggregate(query.from, query.to).await?)
    }

    /// Renders a ticket and hands it to the printer without waiting.
    ///
    /// Returns as soon as the job is queued; the sink's fate is logged by
    /// the dispatcher, never surfaced here.
    #[instrument(skip(self, request))]
    pub async fn reprint(&self, request: ReprintRequest) -> ServiceResult<ReprintAck> {
        let lines = match request {
            ReprintRequest::Sale { id } => self.db.sales().receipt_lines(id).await?,
            ReprintRequest::Adhoc { items } => items,
        };
        if lines.is_empty() {
            return Err(ValidationError::EmptyItems.into());
        }

        let text = receipt::render(&lines, &self.store_name, Utc::now());
        self.printer.dispatch(text);

        info!(lines = lines.len(), "ticket dispatched");
        Ok(ReprintAck { lines: lines.len() })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use verdu_core::Money;
    use verdu_db::DbConfig;

    async fn test_service() -> SalesService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        // Nothing listens on port 1; dispatch failures are logged only
        let printer = PrintClient::new("http://127.0.0.1:1/print", Duration::from_millis(100));
        SalesService::new(db, printer, "VERDULERIA")
    }

    fn item(total_cents: i64) -> NewSaleItem {
        NewSaleItem {
            article_id: None,
            quantity: 1,
            unit_price_cents: total_cents,
            weight: None,
            total_cents,
        }
    }

    fn header(total_cents: i64) -> NewSale {
        NewSale {
            date: None,
            vendor_id: None,
            payment_method_id: None,
            total_cents,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let service = test_service().await;

        let created = service
            .create_sale(CreateSaleInput {
                sale: header(3550),
                items: vec![item(1550), item(2000)],
            })
            .await
            .unwrap();

        let fetched = service.get_sale(created.sale.id).await.unwrap();
        assert_eq!(fetched.sale.total_cents, 3550);
        assert_eq!(fetched.items.len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_items() {
        let service = test_service().await;

        let err = service
            .create_sale(CreateSaleInput {
                sale: header(0),
                items: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::EmptyItems)
        ));

        // Nothing was written
        assert!(service.list_sales().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_total_mismatch() {
        let service = test_service().await;

        let err = service
            .create_sale(CreateSaleInput {
                sale: header(9999),
                items: vec![item(1000)],
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::TotalMismatch {
                provided_cents: 9999,
                computed_cents: 1000,
            })
        ));
    }

    #[tokio::test]
    async fn test_get_unknown_sale_is_not_found() {
        let service = test_service().await;

        let err = service.get_sale(404).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound { entity: "sale", id: 404 }
        ));
    }

    #[tokio::test]
    async fn test_header_only_update_checks_stored_items() {
        let service = test_service().await;
        let created = service
            .create_sale(CreateSaleInput {
                sale: header(1000),
                items: vec![item(1000)],
            })
            .await
            .unwrap();

        let err = service
            .update_sale(
                created.sale.id,
                UpdateSaleInput {
                    sale: header(1234),
                    items: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::TotalMismatch { .. })
        ));

        // A matching header-only amendment goes through
        let updated = service
            .update_sale(
                created.sale.id,
                UpdateSaleInput {
                    sale: NewSale {
                        payment_method_id: Some(verdu_core::CREDIT_PAYMENT_METHOD_ID),
                        ..header(1000)
                    },
                    items: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(
            updated.sale.payment_method_id,
            Some(verdu_core::CREDIT_PAYMENT_METHOD_ID)
        );
        assert_eq!(updated.items.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = test_service().await;
        let created = service
            .create_sale(CreateSaleInput {
                sale: header(500),
                items: vec![item(500)],
            })
            .await
            .unwrap();

        service.delete_sale(created.sale.id).await.unwrap();
        let err = service.get_sale(created.sale.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_report_requires_authorization() {
        let service = test_service().await;
        let query = ReportQuery {
            from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };

        let err = service.report(query, false).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden));

        let report = service.report(query, true).await.unwrap();
        assert_eq!(report.count, 0);
    }

    #[tokio::test]
    async fn test_report_rejects_inverted_range() {
        let service = test_service().await;
        let query = ReportQuery {
            from: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };

        let err = service.report(query, true).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::InvalidDateRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_reprint_unknown_sale_is_not_found() {
        let service = test_service().await;

        let err = service.reprint(ReprintRequest::Sale { id: 7 }).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_reprint_recorded_sale_acknowledges() {
        let service = test_service().await;
        let created = service
            .create_sale(CreateSaleInput {
                sale: header(700),
                items: vec![item(300), item(400)],
            })
            .await
            .unwrap();

        // The sink is dead; the ack must still come back immediately
        let ack = service
            .reprint(ReprintRequest::Sale { id: created.sale.id })
            .await
            .unwrap();
        assert_eq!(ack.lines, 2);
    }

    #[tokio::test]
    async fn test_adhoc_reprint_rejects_empty_lineup() {
        let service = test_service().await;

        let err = service
            .reprint(ReprintRequest::Adhoc { items: vec![] })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::EmptyItems)
        ));

        let ack = service
            .reprint(ReprintRequest::Adhoc {
                items: vec![ReceiptLine {
                    name: "Banana".to_string(),
                    price: Money::from_cents(3550),
                    weight: Some(70.0),
                }],
            })
            .await
            .unwrap();
        assert_eq!(ack.lines, 1);
    }
}
