//! Store schema, created idempotently once at process start

use common::error::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::info;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )
"#;

const CREATE_CARTS: &str = r#"
    CREATE TABLE IF NOT EXISTS carts (
        uid INTEGER NOT NULL UNIQUE,
        items TEXT NOT NULL
    )
"#;

const CREATE_ORDERS: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        uid INTEGER NOT NULL,
        item_numbers INTEGER NOT NULL,
        is_paid INTEGER NOT NULL DEFAULT 0 CHECK (is_paid IN (0, 1)),
        is_delivered INTEGER NOT NULL DEFAULT 0 CHECK (is_delivered IN (0, 1)),
        total_price INTEGER NOT NULL,
        order_items TEXT NOT NULL
    )
"#;

const CREATE_ORDERS_UID_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS orders_uid_idx ON orders (uid)";

/// Create the `users`, `carts` and `orders` tables when missing
pub async fn ensure_schema(pool: &SqlitePool) -> DatabaseResult<()> {
    for statement in [
        CREATE_USERS,
        CREATE_CARTS,
        CREATE_ORDERS,
        CREATE_ORDERS_UID_INDEX,
    ] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(DatabaseError::Schema)?;
    }

    info!("Database schema is up to date");
    Ok(())
}
