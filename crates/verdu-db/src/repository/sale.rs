//! # Sale Repository
//!
//! Database operations for sales and their line items.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Sale Lifecycle                               │
//! │                                                                     │
//! │  CREATE  ── header + every item, one transaction                    │
//! │  GET     ── header joined with items in insertion order             │
//! │  LIST    ── headers newest-first, display names resolved            │
//! │  UPDATE  ── header fields replaced; item set wholesale-replaced     │
//! │            (delete-all, insert-new) in the same transaction         │
//! │  DELETE  ── header and items removed together                       │
//! │                                                                     │
//! │  At no point is a sale visible with a header but no items, items    │
//! │  but no header, or a mixed old/new item set.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use verdu_core::{
    Money, NewSale, NewSaleItem, ReceiptLine, Sale, SaleItem, SaleSummary, SaleWithItems,
};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Persists a sale header together with its line items.
    ///
    /// The header insert and every item insert run in one transaction: a
    /// failure part-way (constraint violation, disk error) rolls the whole
    /// sale back, so no headerless items or itemless headers are ever
    /// visible.
    ///
    /// Input is assumed validated (non-empty, non-negative, total matches
    /// the item sum); the boundary layer owns those checks.
    pub async fn create(&self, sale: &NewSale, items: &[NewSaleItem]) -> DbResult<SaleWithItems> {
        let date = sale.date.unwrap_or_else(Utc::now);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO sales (date, vendor_id, payment_method_id, total_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(date)
        .bind(sale.vendor_id)
        .bind(sale.payment_method_id)
        .bind(sale.total_cents)
        .execute(&mut *tx)
        .await?;

        let sale_id = result.last_insert_rowid();

        for item in items {
            insert_item(&mut tx, sale_id, item).await?;
        }

        let created = fetch_sale_with_items(&mut tx, sale_id).await?;
        tx.commit().await?;

        info!(id = sale_id, total_cents = sale.total_cents, items = items.len(), "sale created");

        Ok(created)
    }

    /// Returns a sale header joined with its line items, in insertion
    /// order.
    pub async fn get(&self, id: i64) -> DbResult<SaleWithItems> {
        let sale: Sale = sqlx::query_as(
            "SELECT id, date, vendor_id, payment_method_id, total_cents FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("sale", id))?;

        let items: Vec<SaleItem> = sqlx::query_as(
            r#"
            SELECT id, sale_id, article_id, quantity, unit_price_cents, weight, total_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(SaleWithItems { sale, items })
    }

    /// Returns all sale headers, newest-first, with vendor/payment-method
    /// display names resolved.
    ///
    /// Items are not loaded here; a missing reference resolves to the
    /// placeholder, never null.
    pub async fn list(&self) -> DbResult<Vec<SaleSummary>> {
        let summaries: Vec<SaleSummary> = sqlx::query_as(
            r#"
            SELECT
                s.id,
                s.date,
                s.vendor_id,
                s.payment_method_id,
                s.total_cents,
                COALESCE(v.name, '-')  AS vendor_name,
                COALESCE(pm.name, '-') AS payment_method_name
            FROM sales s
            LEFT JOIN vendors v          ON s.vendor_id = v.id
            LEFT JOIN payment_methods pm ON s.payment_method_id = pm.id
            ORDER BY s.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Replaces a sale's header fields and, when `items` is given,
    /// wholesale-replaces its item set (delete-all, insert-new).
    ///
    /// With `items: None` only the header changes and the stored items are
    /// left untouched; in that case the new header total is checked
    /// against the stored item sum inside the transaction, so a
    /// header-only update can't break the total invariant either.
    pub async fn update(
        &self,
        id: i64,
        sale: &NewSale,
        items: Option<&[NewSaleItem]>,
    ) -> DbResult<SaleWithItems> {
        debug!(id, replace_items = items.is_some(), "updating sale");

        let mut tx = self.pool.begin().await?;

        // A NULL date keeps the stored timestamp
        let result = sqlx::query(
            r#"
            UPDATE sales
            SET date = COALESCE(?2, date),
                vendor_id = ?3,
                payment_method_id = ?4,
                total_cents = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(sale.date)
        .bind(sale.vendor_id)
        .bind(sale.payment_method_id)
        .bind(sale.total_cents)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("sale", id));
        }

        match items {
            Some(new_items) => {
                sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                for item in new_items {
                    insert_item(&mut tx, id, item).await?;
                }
            }
            None => {
                let stored: i64 = sqlx::query_scalar(
                    "SELECT COALESCE(SUM(total_cents), 0) FROM sale_items WHERE sale_id = ?1",
                )
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

                if stored != sale.total_cents {
                    // Dropping the transaction rolls the header change back
                    return Err(DbError::TotalMismatch {
                        provided_cents: sale.total_cents,
                        computed_cents: stored,
                    });
                }
            }
        }

        let updated = fetch_sale_with_items(&mut tx, id).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Deletes a sale header and all of its line items in one unit of
    /// work.
    ///
    /// The items are removed explicitly, not left to the storage cascade:
    /// orphaned items are a consistency violation, not a cleanup detail.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("sale", id));
        }

        tx.commit().await?;

        info!(id, "sale deleted");

        Ok(())
    }

    /// Loads a sale's items as printable receipt lines: article display
    /// name (placeholder when unreferenced), price charged, scale reading.
    pub async fn receipt_lines(&self, id: i64) -> DbResult<Vec<ReceiptLine>> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM sales WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(DbError::not_found("sale", id));
        }

        let rows: Vec<(String, Option<f64>, i64)> = sqlx::query_as(
            r#"
            SELECT COALESCE(a.name, '-') AS name, si.weight, si.total_cents
            FROM sale_items si
            LEFT JOIN articles a ON si.article_id = a.id
            WHERE si.sale_id = ?1
            ORDER BY si.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, weight, total_cents)| ReceiptLine {
                name,
                price: Money::from_cents(total_cents),
                weight,
            })
            .collect())
    }
}

/// Inserts one line item tied to `sale_id` within the caller's
/// transaction.
async fn insert_item(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    sale_id: i64,
    item: &NewSaleItem,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO sale_items (sale_id, article_id, quantity, unit_price_cents, weight, total_cents)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(sale_id)
    .bind(item.article_id)
    .bind(item.quantity)
    .bind(item.unit_price_cents)
    .bind(item.weight)
    .bind(item.total_cents)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Reads a sale with its items through the caller's transaction, so a
/// create/update returns exactly what it wrote.
async fn fetch_sale_with_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    id: i64,
) -> DbResult<SaleWithItems> {
    let sale: Sale = sqlx::query_as(
        "SELECT id, date, vendor_id, payment_method_id, total_cents FROM sales WHERE id = ?1",
    )
    .bind(id)
    .fetch_one(&mut **tx)
    .await?;

    let items: Vec<SaleItem> = sqlx::query_as(
        r#"
        SELECT id, sale_id, article_id, quantity, unit_price_cents, weight, total_cents
        FROM sale_items
        WHERE sale_id = ?1
        ORDER BY id
        "#,
    )
    .bind(id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(SaleWithItems { sale, items })
}

// =============================================================================
// Unit Tests
// =============================================================================
