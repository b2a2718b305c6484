//! Order model and related functionality

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Number, Value};
use sqlx::FromRow;

/// Order entity, as stored and as listed
///
/// `order_items` is the serialized item list; callers parse it themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub uid: i64,
    pub item_numbers: i64,
    pub is_paid: i64,
    pub is_delivered: i64,
    pub total_price: i64,
    pub order_items: String,
}

/// Typed view of one order line, used to compute the totals
///
/// Fields other than these three are ignored here and kept in the stored
/// item list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "prodID", deserialize_with = "whole_number")]
    pub prod_id: i64,
    pub price: f64,
    #[serde(deserialize_with = "whole_number")]
    pub quantity: i64,
}

/// Accept `2` as well as `2.0`, reject `2.5`
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }

    match number.as_f64() {
        Some(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Ok(n as i64),
        _ => Err(de::Error::custom("expected a whole number")),
    }
}

/// Aggregates computed once when an order is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of quantities
    pub item_numbers: i64,
    /// Grand total in cents
    pub total_price: i64,
}

impl OrderTotals {
    /// Fold the items into totals.
    ///
    /// The price sum is taken in fractional cents and rounded once on the
    /// grand total, never per line. Sums that do not fit an `i64` are
    /// rejected.
    pub fn from_items(items: &[OrderItem]) -> Result<Self, String> {
        let item_numbers = items
            .iter()
            .try_fold(0i64, |sum, item| sum.checked_add(item.quantity))
            .ok_or_else(|| "Order quantities are too large.".to_string())?;

        let cents: f64 = items
            .iter()
            .map(|item| item.quantity as f64 * item.price * 100.0)
            .sum::<f64>()
            .round();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return Err("Order total is too large.".to_string());
        }

        Ok(Self {
            item_numbers,
            total_price: cents as i64,
        })
    }
}

/// Request for `POST /orders/neworder`
#[derive(Debug, Deserialize)]
pub struct NewOrderRequest {
    pub items: Vec<Value>,
}

/// Order ready to be stored: the item list as sent plus its totals
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub items: Vec<Value>,
    pub totals: OrderTotals,
}

impl TryFrom<NewOrderRequest> for NewOrder {
    type Error = String;

    fn try_from(req: NewOrderRequest) -> Result<Self, Self::Error> {
        let lines = req
            .items
            .iter()
            .map(OrderItem::deserialize)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                "Each order item needs a whole prodID and quantity and a numeric price.".to_string()
            })?;

        Ok(Self {
            totals: OrderTotals::from_items(&lines)?,
            items: req.items,
        })
    }
}

/// Response for `POST /orders/neworder`
#[derive(Debug, Serialize)]
pub struct NewOrderResponse {
    pub id: i64,
}

/// Response for order listings
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

/// Request for `POST /orders/updateorder`
#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(rename = "orderID")]
    pub order_id: i64,
    #[serde(rename = "isPaid")]
    pub is_paid: i64,
    #[serde(rename = "isDelivered")]
    pub is_delivered: i64,
}

/// Result of a status update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    #[serde(rename = "lastID")]
    pub last_id: i64,
    pub changes: u64,
}

/// Response for `POST /orders/updateorder`
#[derive(Debug, Serialize)]
pub struct UpdateOrderResponse {
    pub result: StatusChange,
}
