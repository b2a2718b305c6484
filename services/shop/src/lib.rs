//! Shop backend
//!
//! REST service for account signup/signin, a persistent per-account cart,
//! and order placement and tracking. Every response is transport status 200
//! with a `{"status": "OK" | "error", ...}` envelope; unknown routes are 404.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod settings;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
