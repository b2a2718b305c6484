//! Order repository for database operations

use common::error::DatabaseError;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{NewOrder, Order, StatusChange};

const ORDER_COLUMNS: &str =
    "id, uid, item_numbers, is_paid, is_delivered, total_price, order_items";

/// Order repository
#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order and return its id
    ///
    /// The item list is stored as sent, next to its totals, and never
    /// changes afterwards.
    pub async fn create(&self, uid: i64, new_order: &NewOrder) -> Result<i64, DatabaseError> {
        let totals = new_order.totals;
        let order_items =
            serde_json::to_string(&new_order.items).map_err(DatabaseError::Encoding)?;

        info!(
            "Creating order for account {}: {} items, {} cents",
            uid, totals.item_numbers, totals.total_price
        );

        let result = sqlx::query(
            r#"
            INSERT INTO orders (uid, item_numbers, is_paid, is_delivered, total_price, order_items)
            VALUES (?, ?, 0, 0, ?, ?)
            "#,
        )
        .bind(uid)
        .bind(totals.item_numbers)
        .bind(totals.total_price)
        .bind(&order_items)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(result.last_insert_rowid())
    }

    /// Get all orders of an account, oldest first
    pub async fn list_by_user(&self, uid: i64) -> Result<Vec<Order>, DatabaseError> {
        sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE uid = ? ORDER BY id"
        ))
        .bind(uid)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    /// Get every order in the store
    pub async fn list_all(&self) -> Result<Vec<Order>, DatabaseError> {
        sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    /// Overwrite the paid and delivered flags of an order owned by `uid`
    ///
    /// An order that does not exist or belongs to someone else is left
    /// untouched and reported with zero changes.
    pub async fn update_status(
        &self,
        order_id: i64,
        uid: i64,
        is_paid: i64,
        is_delivered: i64,
    ) -> Result<StatusChange, DatabaseError> {
        info!(
            "Updating order {}: is_paid={}, is_delivered={}",
            order_id, is_paid, is_delivered
        );

        let result = sqlx::query(
            "UPDATE orders SET is_paid = ?, is_delivered = ? WHERE id = ? AND uid = ?",
        )
        .bind(is_paid)
        .bind(is_delivered)
        .bind(order_id)
        .bind(uid)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(StatusChange {
            last_id: order_id,
            changes: result.rows_affected(),
        })
    }
}
