//! Order submission rules.
//!
//! [`PlaceOrderRequest`] is the loosely-typed body a checkout sends.
//! [`validate_place_order`] turns it into a [`NewOrder`] or rejects it with
//! [`CoreError::Validation`]; a rejected request must never reach the store.

use chrono::{NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Status every new order starts in. Nothing in the service changes it.
pub const DEFAULT_ORDER_STATUS: &str = "Order Placed";

pub const MSG_INVALID_ITEMS: &str = "Invalid order details";
pub const MSG_MISSING_COMPANY_INFO: &str = "Please fill all company information fields";
pub const MSG_INVALID_QUANTITY: &str = "Item quantity must be a positive integer";
pub const MSG_INVALID_CONTACT_NUMBER: &str = "Contact number must be numeric";
pub const MSG_INVALID_TIMELINE: &str = "Timeline must be a valid date (YYYY-MM-DD or RFC 3339)";

/// How an order is paid for. Only [`PaymentType::Cod`] is ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "COD")]
    Cod,
    Online,
}

impl PaymentType {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentType::Cod => "COD",
            PaymentType::Online => "Online",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "COD" => Some(PaymentType::Cod),
            "Online" => Some(PaymentType::Online),
            _ => None,
        }
    }
}

/// Orders are only listed once they are cash-on-delivery or already paid.
pub fn is_listable(payment_type: PaymentType, is_paid: bool) -> bool {
    payment_type == PaymentType::Cod || is_paid
}

/// Which orders a listing may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// Only the orders placed by this buyer.
    Buyer(DbId),
    /// Every buyer's orders (seller/admin view).
    All,
}

impl OrderScope {
    pub fn buyer(self) -> Option<DbId> {
        match self {
            OrderScope::Buyer(id) => Some(id),
            OrderScope::All => None,
        }
    }

    pub fn permits(self, user_id: DbId) -> bool {
        match self {
            OrderScope::Buyer(id) => id == user_id,
            OrderScope::All => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

/// Contact numbers arrive either as a JSON number or as a string from a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactNumberInput {
    Number(serde_json::Number),
    Text(String),
}

/// One `{ product, quantity }` pair from the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product: DbId,
    pub quantity: i64,
}

/// Body of `POST /api/order/cod`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub items: Option<Vec<OrderItemInput>>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_description: Option<String>,
    #[serde(default)]
    pub contact_number: Option<ContactNumberInput>,
    #[serde(default)]
    pub time_line: Option<String>,
}

// ---------------------------------------------------------------------------
// Validated shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: DbId,
    pub quantity: i32,
}

/// A fully validated order, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: DbId,
    pub items: Vec<NewOrderItem>,
    pub company_name: String,
    pub company_description: String,
    pub contact_number: i64,
    pub time_line: Timestamp,
    pub payment_type: PaymentType,
    pub is_paid: bool,
    pub status: String,
}

/// Validate a cash-on-delivery submission for `user_id`.
///
/// Items are checked before the company fields so an empty cart reports
/// [`MSG_INVALID_ITEMS`] even when the form is also blank.
pub fn validate_place_order(
    user_id: DbId,
    request: &PlaceOrderRequest,
) -> Result<NewOrder, CoreError> {
    let items = validate_items(request.items.as_deref())?;

    let company_name = non_blank(request.company_name.as_deref());
    let company_description = non_blank(request.company_description.as_deref());
    let time_line = non_blank(request.time_line.as_deref());
    let contact_number = request
        .contact_number
        .as_ref()
        .filter(|c| !contact_is_blank(c));

    let (Some(company_name), Some(company_description), Some(contact_number), Some(time_line)) =
        (company_name, company_description, contact_number, time_line)
    else {
        return Err(CoreError::Validation(MSG_MISSING_COMPANY_INFO.into()));
    };

    Ok(NewOrder {
        user_id,
        items,
        company_name: company_name.to_string(),
        company_description: company_description.to_string(),
        contact_number: parse_contact_number(contact_number)?,
        time_line: parse_timeline(time_line)?,
        payment_type: PaymentType::Cod,
        is_paid: false,
        status: DEFAULT_ORDER_STATUS.to_string(),
    })
}

fn validate_items(items: Option<&[OrderItemInput]>) -> Result<Vec<NewOrderItem>, CoreError> {
    let items = match items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(CoreError::Validation(MSG_INVALID_ITEMS.into())),
    };

    items
        .iter()
        .map(|item| {
            if item.product <= 0 {
                return Err(CoreError::Validation(MSG_INVALID_ITEMS.into()));
            }
            let quantity = i32::try_from(item.quantity)
                .ok()
                .filter(|q| *q > 0)
                .ok_or_else(|| CoreError::Validation(MSG_INVALID_QUANTITY.into()))?;
            Ok(NewOrderItem {
                product_id: item.product,
                quantity,
            })
        })
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Blank strings and zero count as "not filled in".
fn contact_is_blank(input: &ContactNumberInput) -> bool {
    match input {
        ContactNumberInput::Number(n) => n.as_f64() == Some(0.0),
        ContactNumberInput::Text(s) => s.trim().is_empty(),
    }
}

/// Coerce a contact number to an integer, rejecting anything that is not one.
///
/// Strings may carry a leading `+` and the usual separators (spaces,
/// parentheses, and dashes between digits); what remains must be ASCII digits.
pub fn parse_contact_number(input: &ContactNumberInput) -> Result<i64, CoreError> {
    let invalid = || CoreError::Validation(MSG_INVALID_CONTACT_NUMBER.into());

    let value = match input {
        ContactNumberInput::Number(n) => n.as_i64().ok_or_else(invalid)?,
        ContactNumberInput::Text(s) => {
            let trimmed = s.trim();
            let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
            if !dashes_are_between_digits(trimmed) {
                return Err(invalid());
            }
            let digits: String = trimmed
                .chars()
                .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
                .collect();
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            digits.parse::<i64>().map_err(|_| invalid())?
        }
    };

    if value <= 0 {
        return Err(invalid());
    }
    Ok(value)
}

/// A `-` is a separator only with a digit on each side; a leading one is a sign.
fn dashes_are_between_digits(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    chars.iter().enumerate().all(|(i, c)| {
        *c != '-'
            || (i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(char::is_ascii_digit))
    })
}

/// Parse a delivery timeline. Bare dates are taken as midnight UTC.
pub fn parse_timeline(input: &str) -> Result<Timestamp, CoreError> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }
    chrono::DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| CoreError::Validation(MSG_INVALID_TIMELINE.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn valid_request() -> PlaceOrderRequest {
        serde_json::from_value(json!({
            "items": [{ "product": 1, "quantity": 2 }],
            "companyName": "Acme",
            "companyDescription": "desc",
            "contactNumber": 555,
            "timeLine": "2025-01-01"
        }))
        .unwrap()
    }

    fn validation_message(result: Result<NewOrder, CoreError>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_request_becomes_unpaid_cod_order() {
        let order = validate_place_order(7, &valid_request()).unwrap();

        assert_eq!(order.user_id, 7);
        assert_eq!(
            order.items,
            vec![NewOrderItem {
                product_id: 1,
                quantity: 2
            }]
        );
        assert_eq!(order.company_name, "Acme");
        assert_eq!(order.contact_number, 555);
        assert_eq!(order.time_line.to_rfc3339(), "2025-01-01T00:00:00+00:00");
        assert_eq!(order.payment_type, PaymentType::Cod);
        assert!(!order.is_paid);
        assert_eq!(order.status, DEFAULT_ORDER_STATUS);
    }

    #[test]
    fn empty_or_missing_items_are_rejected() {
        let mut request = valid_request();
        request.items = Some(vec![]);
        assert_eq!(
            validation_message(validate_place_order(1, &request)),
            MSG_INVALID_ITEMS
        );

        request.items = None;
        assert_eq!(
            validation_message(validate_place_order(1, &request)),
            MSG_INVALID_ITEMS
        );
    }

    #[test]
    fn items_are_checked_before_company_fields() {
        let request = PlaceOrderRequest::default();
        assert_eq!(
            validation_message(validate_place_order(1, &request)),
            MSG_INVALID_ITEMS
        );
    }

    #[test]
    fn each_missing_company_field_is_rejected() {
        let blanks: [fn(&mut PlaceOrderRequest); 4] = [
            |r| r.company_name = None,
            |r| r.company_description = Some("   ".into()),
            |r| r.contact_number = None,
            |r| r.time_line = Some(String::new()),
        ];
        for blank in blanks {
            let mut request = valid_request();
            blank(&mut request);
            assert_eq!(
                validation_message(validate_place_order(1, &request)),
                MSG_MISSING_COMPANY_INFO
            );
        }
    }

    #[test]
    fn zero_contact_number_counts_as_missing() {
        let mut request = valid_request();
        request.contact_number = Some(ContactNumberInput::Number(0.into()));
        assert_eq!(
            validation_message(validate_place_order(1, &request)),
            MSG_MISSING_COMPANY_INFO
        );
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        for quantity in [0, -3, i64::from(i32::MAX) + 1] {
            let mut request = valid_request();
            request.items = Some(vec![OrderItemInput {
                product: 1,
                quantity,
            }]);
            assert_eq!(
                validation_message(validate_place_order(1, &request)),
                MSG_INVALID_QUANTITY
            );
        }
    }

    #[test]
    fn contact_number_strings_are_coerced() {
        let parse = |s: &str| parse_contact_number(&ContactNumberInput::Text(s.into()));
        assert_eq!(parse("555").unwrap(), 555);
        assert_eq!(parse(" +1 (555) 010-9999 ").unwrap(), 15550109999);
        assert_matches!(parse("call me"), Err(CoreError::Validation(_)));
        assert_matches!(parse("12a4"), Err(CoreError::Validation(_)));
        assert_matches!(parse("99999999999999999999"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn signed_contact_number_strings_are_rejected() {
        let parse = |s: &str| parse_contact_number(&ContactNumberInput::Text(s.into()));
        assert_matches!(parse("-555"), Err(CoreError::Validation(_)));
        assert_matches!(parse(" -555 "), Err(CoreError::Validation(_)));
        assert_matches!(parse("+-555"), Err(CoreError::Validation(_)));
        assert_matches!(parse("555-"), Err(CoreError::Validation(_)));
        assert_matches!(parse("555--0100"), Err(CoreError::Validation(_)));
        assert_eq!(parse("555-0100").unwrap(), 5550100);
    }

    #[test]
    fn fractional_or_negative_contact_numbers_are_rejected() {
        let fractional: serde_json::Number = serde_json::from_str("555.5").unwrap();
        assert_matches!(
            parse_contact_number(&ContactNumberInput::Number(fractional)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            parse_contact_number(&ContactNumberInput::Number((-5).into())),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn non_numeric_contact_number_rejects_the_order() {
        let mut request = valid_request();
        request.contact_number = Some(ContactNumberInput::Text("not a number".into()));
        assert_eq!(
            validation_message(validate_place_order(1, &request)),
            MSG_INVALID_CONTACT_NUMBER
        );
    }

    #[test]
    fn timeline_accepts_dates_and_rfc3339() {
        let date = parse_timeline("2025-03-04").unwrap();
        assert_eq!(date.to_rfc3339(), "2025-03-04T00:00:00+00:00");

        let stamp = parse_timeline("2025-03-04T10:30:00+02:00").unwrap();
        assert_eq!(stamp.to_rfc3339(), "2025-03-04T08:30:00+00:00");

        assert_matches!(parse_timeline("next week"), Err(CoreError::Validation(_)));
        assert_matches!(parse_timeline("2025-13-01"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn listable_orders_are_cod_or_paid() {
        assert!(is_listable(PaymentType::Cod, false));
        assert!(is_listable(PaymentType::Online, true));
        assert!(!is_listable(PaymentType::Online, false));
    }

    #[test]
    fn scope_permits_only_its_buyer() {
        assert!(OrderScope::Buyer(3).permits(3));
        assert!(!OrderScope::Buyer(3).permits(4));
        assert!(OrderScope::All.permits(4));
        assert_eq!(OrderScope::Buyer(3).buyer(), Some(3));
        assert_eq!(OrderScope::All.buyer(), None);
    }

    #[test]
    fn payment_type_serializes_as_wire_names() {
        assert_eq!(serde_json::to_value(PaymentType::Cod).unwrap(), json!("COD"));
        assert_eq!(PaymentType::parse("Online"), Some(PaymentType::Online));
        assert_eq!(PaymentType::parse("cash"), None);
    }
}
