//! Format checks that a submitted receipt must pass before it is stored.
//!
//! Validation works on raw JSON so that a missing field, or a field of the wrong type, is reported
//! as a format violation instead of failing deserialization with a serde message. The checks run
//! in a fixed order and the first failure is the one reported:
//!
//! 1. retailer
//! 2. purchase date
//! 3. purchase time
//! 4. total
//! 5. the items list itself
//! 6. each item in order, description before price

use crate::model::{Amount, Description, Item, PurchaseDate, PurchaseTime, Receipt, Retailer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::trace;

const RETAILER: &str = "retailer";
const PURCHASE_DATE: &str = "purchaseDate";
const PURCHASE_TIME: &str = "purchaseTime";
const TOTAL: &str = "total";
const ITEMS: &str = "items";
const SHORT_DESCRIPTION: &str = "shortDescription";
const PRICE: &str = "price";

/// The reason a receipt was rejected. `Display` produces the message returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Retailer,
    PurchaseDate,
    PurchaseTime,
    Total,
    /// `items` is missing or is not a list.
    Items,
    /// `items` is empty and the policy requires at least one.
    NoItems,
    /// Holds the offending description as submitted.
    ItemDescription(String),
    /// Holds the offending price as submitted.
    ItemPrice(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Retailer => f.write_str("Invalid retailer name format."),
            ValidationError::PurchaseDate => f.write_str("Invalid purchase date format."),
            ValidationError::PurchaseTime => f.write_str("Invalid purchase time format."),
            ValidationError::Total => f.write_str("Invalid total format."),
            ValidationError::Items => f.write_str("Invalid items format."),
            ValidationError::NoItems => f.write_str("Receipt must contain at least one item."),
            ValidationError::ItemDescription(s) => write!(f, "Invalid item description: {s}"),
            ValidationError::ItemPrice(s) => write!(f, "Invalid item price: {s}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Knobs that loosen or tighten what validation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Policy {
    /// Whether a receipt with an empty `items` list is accepted.
    pub allow_empty_items: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            allow_empty_items: true,
        }
    }
}

/// Validates `raw` with the default `Policy`.
pub fn validate(raw: &Value) -> Result<Receipt, ValidationError> {
    validate_with(raw, Policy::default())
}

/// Validates `raw` and, if every check passes, returns the parsed `Receipt`.
pub fn validate_with(raw: &Value, policy: Policy) -> Result<Receipt, ValidationError> {
    trace!("validating {raw}");
    let retailer: Retailer = text(raw, RETAILER)
        .ok_or(ValidationError::Retailer)?
        .parse()?;
    let purchase_date: PurchaseDate = text(raw, PURCHASE_DATE)
        .ok_or(ValidationError::PurchaseDate)?
        .parse()?;
    let purchase_time: PurchaseTime = text(raw, PURCHASE_TIME)
        .ok_or(ValidationError::PurchaseTime)?
        .parse()?;
    let total = text(raw, TOTAL)
        .and_then(|s| Amount::from_str(s).ok())
        .ok_or(ValidationError::Total)?;

    let raw_items = raw
        .get(ITEMS)
        .and_then(Value::as_array)
        .ok_or(ValidationError::Items)?;
    if raw_items.is_empty() && !policy.allow_empty_items {
        return Err(ValidationError::NoItems);
    }
    let items = raw_items
        .iter()
        .map(validate_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Receipt {
        retailer,
        purchase_date,
        purchase_time,
        total,
        items,
    })
}

fn validate_item(raw: &Value) -> Result<Item, ValidationError> {
    let short_description: Description = match text(raw, SHORT_DESCRIPTION) {
        Some(s) => s.parse()?,
        None => return Err(ValidationError::ItemDescription(render(raw.get(SHORT_DESCRIPTION)))),
    };
    let price = text(raw, PRICE)
        .and_then(|s| Amount::from_str(s).ok())
        .ok_or_else(|| ValidationError::ItemPrice(render(raw.get(PRICE))))?;
    Ok(Item {
        short_description,
        price,
    })
}

/// Returns the string stored under `key`, or `None` when `raw` is not an object, the key is
/// absent, or the value is not a string.
fn text<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key).and_then(Value::as_str)
}

/// Renders a submitted value for a rejection message.
fn render(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => Value::Null.to_string(),
    }
}
