//! Application state shared across handlers

use sqlx::SqlitePool;

use crate::{
    jwt::JwtService,
    repositories::{AccountRepository, CartRepository, OrderRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub jwt_service: JwtService,
    pub account_repository: AccountRepository,
    pub cart_repository: CartRepository,
    pub order_repository: OrderRepository,
}

impl AppState {
    /// Wire every repository to the same pool
    pub fn new(db_pool: SqlitePool, jwt_service: JwtService) -> Self {
        Self {
            account_repository: AccountRepository::new(db_pool.clone()),
            cart_repository: CartRepository::new(db_pool.clone()),
            order_repository: OrderRepository::new(db_pool.clone()),
            db_pool,
            jwt_service,
        }
    }
}
