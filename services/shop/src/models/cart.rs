//! Cart payloads
//!
//! Cart items are kept as opaque JSON values (`{id, price, count}` by
//! convention) and handed back exactly as they were stored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request for `PUT /cart`
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub items: Vec<Value>,
}

/// Response for `GET /cart`
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<Value>,
}
