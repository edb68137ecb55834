//! # Reference Repository
//!
//! Lookup (and minimal maintenance) of the flat reference tables:
//! vendors, articles and payment methods.
//!
//! These are id → name records with a uniqueness constraint and nothing
//! else; the sale engine only ever resolves display names from them.
//! Payment methods are seeded with well-known ids by migration 002 and
//! may be relabeled, never renumbered.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for reference-data lookups.
#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    pool: SqlitePool,
}

impl ReferenceRepository {
    /// Creates a new ReferenceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReferenceRepository { pool }
    }

    /// Inserts a vendor, returning its generated id. Names are unique.
    pub async fn create_vendor(&self, name: &str) -> DbResult<i64> {
        debug!(name, "creating vendor");

        let result = sqlx::query("INSERT INTO vendors (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Inserts an article, returning its generated id. Codes are unique.
    pub async fn create_article(
        &self,
        code: &str,
        name: &str,
        price_cents: Option<i64>,
    ) -> DbResult<i64> {
        debug!(code, name, "creating article");

        let result =
            sqlx::query("INSERT INTO articles (code, name, price_cents) VALUES (?1, ?2, ?3)")
                .bind(code)
                .bind(name)
                .bind(price_cents)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Resolves a vendor's display name.
    pub async fn vendor_name(&self, id: i64) -> DbResult<Option<String>> {
        let name = sqlx::query_scalar("SELECT name FROM vendors WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(name)
    }

    /// Resolves a payment method's display name.
    pub async fn payment_method_name(&self, id: i64) -> DbResult<Option<String>> {
        let name = sqlx::query_scalar("SELECT name FROM payment_methods WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(name)
    }

    /// Resolves an article's display name.
    pub async fn article_name(&self, id: i64) -> DbResult<Option<String>> {
        let name = sqlx::query_scalar("SELECT name FROM articles WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(name)
    }

    /// Relabels a payment method. The id (what reports key on) never
    /// changes.
    pub async fn rename_payment_method(&self, id: i64, name: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE payment_methods SET name = ?2 WHERE id = ?1")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("payment method", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_vendor_round_trip() {
        let db = test_db().await;
        let refs = db.references();

        let id = refs.create_vendor("Ramiro").await.unwrap();
        assert_eq!(refs.vendor_name(id).await.unwrap().as_deref(), Some("Ramiro"));
        assert_eq!(refs.vendor_name(id + 1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_vendor_name_rejected() {
        let db = test_db().await;
        let refs = db.references();

        refs.create_vendor("Ramiro").await.unwrap();
        let err = refs.create_vendor("Ramiro").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_article_round_trip() {
        let db = test_db().await;
        let refs = db.references();

        let id = refs.create_article("BAN", "Banana", Some(500)).await.unwrap();
        assert_eq!(refs.article_name(id).await.unwrap().as_deref(), Some("Banana"));

        let err = refs.create_article("BAN", "Other", None).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_rename_payment_method() {
        let db = test_db().await;
        let refs = db.references();

        refs.rename_payment_method(1, "Contado").await.unwrap();
        assert_eq!(
            refs.payment_method_name(1).await.unwrap().as_deref(),
            Some("Contado")
        );

        let err = refs.rename_payment_method(99, "X").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
