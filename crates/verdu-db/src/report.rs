//! # Report Aggregation
//!
//! Date-ranged sales aggregation: global totals, cash/credit split, and a
//! per-vendor breakdown.
//!
//! ## Aggregation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Aggregate(from, to), both bounds inclusive calendar dates          │
//! │                                                                     │
//! │  match:    DATE(sales.date) BETWEEN from AND to                     │
//! │            (date component only, never time-of-day)                 │
//! │                                                                     │
//! │  total     Σ total_cents over the matched set (0 if none)           │
//! │  cash      Σ restricted to payment_method_id = 1 (well-known id)    │
//! │  credit    Σ restricted to payment_method_id = 3 (well-known id)    │
//! │  count     matched sales                                            │
//! │  by_vendor GROUP BY vendor; zero-sale vendors omitted               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sums run in SQL over integer cents; a NULL aggregate (no rows) is
//! normalized to 0 before it ever leaves this module. The cash/credit
//! split keys on the seeded ids, so relabeling a payment method has no
//! effect on the report.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use verdu_core::{SalesReport, VendorSales, CASH_PAYMENT_METHOD_ID, CREDIT_PAYMENT_METHOD_ID};

/// Repository for sales report aggregation.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Aggregates all sales whose date falls in `[from, to]`.
    ///
    /// `from <= to` is the boundary layer's precondition; this method just
    /// computes (an inverted range simply matches nothing).
    pub async fn aggregate(&self, from: NaiveDate, to: NaiveDate) -> DbResult<SalesReport> {
        debug!(%from, %to, "aggregating sales");

        let (total_cents, cash_cents, credit_cents, count): (i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    COALESCE(SUM(total_cents), 0),
                    COALESCE(SUM(CASE WHEN payment_method_id = ?3 THEN total_cents ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN payment_method_id = ?4 THEN total_cents ELSE 0 END), 0),
                    COUNT(*)
                FROM sales
                WHERE DATE(date) BETWEEN ?1 AND ?2
                "#,
            )
            .bind(from)
            .bind(to)
            .bind(CASH_PAYMENT_METHOD_ID)
            .bind(CREDIT_PAYMENT_METHOD_ID)
            .fetch_one(&self.pool)
            .await?;

        let by_vendor: Vec<VendorSales> = sqlx::query_as(
            r#"
            SELECT v.name AS name, COUNT(*) AS count, SUM(s.total_cents) AS total_cents
            FROM sales s
            JOIN vendors v ON s.vendor_id = v.id
            WHERE DATE(s.date) BETWEEN ?1 AND ?2
            GROUP BY s.vendor_id
            ORDER BY v.name
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(SalesReport {
            total_cents,
            cash_cents,
            credit_cents,
            count,
            by_vendor,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{TimeZone, Utc};
    use verdu_core::{NewSale, NewSaleItem};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn record_sale(
        db: &Database,
        y: i32,
        m: u32,
        d: u32,
        total_cents: i64,
        payment_method_id: Option<i64>,
        vendor_id: Option<i64>,
    ) {
        let sale = NewSale {
            date: Some(Utc.with_ymd_and_hms(y, m, d, 23, 45, 0).unwrap()),
            vendor_id,
            payment_method_id,
            total_cents,
        };
        let items = [NewSaleItem {
            article_id: None,
            quantity: 1,
            unit_price_cents: total_cents,
            weight: None,
            total_cents,
        }];
        db.sales().create(&sale, &items).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_range_is_all_zeros() {
        let db = test_db().await;

        let report = db
            .reports()
            .aggregate(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        assert_eq!(
            report,
            SalesReport {
                total_cents: 0,
                cash_cents: 0,
                credit_cents: 0,
                count: 0,
                by_vendor: vec![],
            }
        );
    }

    #[tokio::test]
    async fn test_cash_credit_split_and_vendor_breakdown() {
        let db = test_db().await;
        let v1 = db.references().create_vendor("V1").await.unwrap();

        record_sale(&db, 2024, 1, 5, 10000, Some(CASH_PAYMENT_METHOD_ID), Some(v1)).await;
        record_sale(&db, 2024, 1, 6, 5000, Some(CREDIT_PAYMENT_METHOD_ID), Some(v1)).await;

        let report = db
            .reports()
            .aggregate(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        assert_eq!(report.total_cents, 15000);
        assert_eq!(report.cash_cents, 10000);
        assert_eq!(report.credit_cents, 5000);
        assert_eq!(report.count, 2);
        assert_eq!(
            report.by_vendor,
            vec![VendorSales {
                name: "V1".to_string(),
                count: 2,
                total_cents: 15000,
            }]
        );
    }

    #[tokio::test]
    async fn test_bounds_are_inclusive_on_the_date_component() {
        let db = test_db().await;

        // Late in the evening on both boundary days
        record_sale(&db, 2024, 1, 1, 100, None, None).await;
        record_sale(&db, 2024, 1, 31, 200, None, None).await;
        // Just outside the range
        record_sale(&db, 2023, 12, 31, 400, None, None).await;
        record_sale(&db, 2024, 2, 1, 800, None, None).await;

        let report = db
            .reports()
            .aggregate(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        assert_eq!(report.total_cents, 300);
        assert_eq!(report.count, 2);
    }

    #[tokio::test]
    async fn test_other_payment_methods_count_in_total_only() {
        let db = test_db().await;

        // Debit (id 2) and no-method sales: in total, in neither split
        record_sale(&db, 2024, 1, 10, 700, Some(2), None).await;
        record_sale(&db, 2024, 1, 11, 300, None, None).await;

        let report = db
            .reports()
            .aggregate(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        assert_eq!(report.total_cents, 1000);
        assert_eq!(report.cash_cents, 0);
        assert_eq!(report.credit_cents, 0);
        // No vendor on either sale, so no breakdown entries
        assert!(report.by_vendor.is_empty());
    }

    #[tokio::test]
    async fn test_split_keys_on_ids_not_names() {
        let db = test_db().await;

        record_sale(&db, 2024, 1, 5, 10000, Some(CASH_PAYMENT_METHOD_ID), None).await;

        // Relabeling the reference record must not change what the report
        // counts as cash
        db.references()
            .rename_payment_method(CASH_PAYMENT_METHOD_ID, "Tarjeta")
            .await
            .unwrap();

        let report = db
            .reports()
            .aggregate(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        assert_eq!(report.cash_cents, 10000);
    }

    #[tokio::test]
    async fn test_vendors_sorted_by_name() {
        let db = test_db().await;
        let zaira = db.references().create_vendor("Zaira").await.unwrap();
        let ana = db.references().create_vendor("Ana").await.unwrap();

        record_sale(&db, 2024, 1, 5, 100, None, Some(zaira)).await;
        record_sale(&db, 2024, 1, 6, 200, None, Some(ana)).await;

        let report = db
            .reports()
            .aggregate(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        let names: Vec<&str> = report.by_vendor.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Zaira"]);
    }
}
