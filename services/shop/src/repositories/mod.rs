//! Repositories for database operations

pub mod account;
pub mod cart;
pub mod order;

pub use account::AccountRepository;
pub use cart::CartRepository;
pub use order::OrderRepository;
