//! Shop models for request and response payloads

pub mod account;
pub mod cart;
pub mod envelope;
pub mod order;

// Re-export for convenience
pub use account::{
    Account, AccountsResponse, NewAccount, SessionResponse, SigninRequest, SignupRequest,
    UpdateProfileRequest, UpdateProfileResponse,
};
pub use cart::{CartResponse, UpdateCartRequest};
pub use envelope::{Ack, Envelope};
pub use order::{
    NewOrder, NewOrderRequest, NewOrderResponse, Order, OrderItem, OrderTotals, OrdersResponse,
    StatusChange, UpdateOrderRequest, UpdateOrderResponse,
};
