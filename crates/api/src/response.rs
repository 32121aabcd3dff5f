//! Response envelopes.
//!
//! Successful responses carry `"success": true` next to their payload,
//! mirroring the `{ "success": false, ... }` error envelope in
//! [`crate::error`].

use serde::Serialize;

/// `{ "success": true, ...payload }`.
///
/// The payload is flattened into the envelope, so its field names become
/// top-level keys:
///
/// ```ignore
/// Ok(Json(Success::new(OrdersPayload { orders })))
/// ```
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Placed {
        order_id: i64,
    }

    #[test]
    fn payload_is_flattened_next_to_success() {
        let json = serde_json::to_value(Success::new(Placed { order_id: 9 })).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "orderId": 9 }));
    }
}
