//! Cart repository for database operations
//!
//! Each account owns at most one cart row holding the whole item list as a
//! JSON blob. Writes replace the list wholesale.

use common::error::DatabaseError;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::info;

/// Cart repository
#[derive(Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Create a new cart repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the items of an account's cart; no cart yet reads as an empty list
    pub async fn get(&self, uid: i64) -> Result<Vec<Value>, DatabaseError> {
        let items: Option<String> = sqlx::query_scalar("SELECT items FROM carts WHERE uid = ?")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        match items {
            Some(items) => serde_json::from_str(&items).map_err(DatabaseError::Encoding),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the items of an account's cart, creating the row on first write
    pub async fn put(&self, uid: i64, items: &[Value]) -> Result<(), DatabaseError> {
        info!("Replacing cart of account {} with {} items", uid, items.len());

        let items = serde_json::to_string(items).map_err(DatabaseError::Encoding)?;

        sqlx::query(
            r#"
            INSERT INTO carts (uid, items)
            VALUES (?, ?)
            ON CONFLICT (uid) DO UPDATE SET items = excluded.items
            "#,
        )
        .bind(uid)
        .bind(&items)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(())
    }
}
