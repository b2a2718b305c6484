//! Success envelope shared by every endpoint

use axum::Json;
use serde::Serialize;

/// `{"status": "OK", ...body}`
///
/// The body's fields are flattened next to `status`. Failures use the
/// envelope rendered by [`crate::error::ApiError`].
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    status: &'static str,
    #[serde(flatten)]
    body: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(body: T) -> Json<Self> {
        Json(Envelope { status: "OK", body })
    }
}

/// Empty body for operations that only acknowledge success
#[derive(Debug, Serialize)]
pub struct Ack {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Body {
        id: i64,
    }

    #[test]
    fn test_body_fields_sit_next_to_status() {
        let Json(envelope) = Envelope::ok(Body { id: 3 });
        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            json!({"status": "OK", "id": 3})
        );
    }

    #[test]
    fn test_ack_is_status_only() {
        let Json(envelope) = Envelope::ok(Ack {});
        assert_eq!(serde_json::to_value(envelope).unwrap(), json!({"status": "OK"}));
    }
}
