//! Persistence plumbing shared by the shop backend
//!
//! Database configuration, connection pooling and the database error type.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, close_pool, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     println!("Database health check: {}", health_check(&pool).await?);
//!     close_pool(&pool).await;
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
