//! Shared receipt fixtures for tests.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::Receipt;
use crate::validation::validate;
use serde_json::{json, Value};

/// Builds raw receipt JSON. `items` are `(shortDescription, price)` pairs.
pub fn receipt_json(
    retailer: &str,
    purchase_date: &str,
    purchase_time: &str,
    total: &str,
    items: Vec<(&str, &str)>,
) -> Value {
    let items: Vec<Value> = items
        .into_iter()
        .map(|(description, price)| json!({"shortDescription": description, "price": price}))
        .collect();
    json!({
        "retailer": retailer,
        "purchaseDate": purchase_date,
        "purchaseTime": purchase_time,
        "total": total,
        "items": items,
    })
}

/// The Target receipt, worth 28 points.
pub fn target_json() -> Value {
    receipt_json(
        "Target",
        "2022-01-01",
        "13:01",
        "35.35",
        vec![
            ("Mountain Dew 12PK", "6.49"),
            ("Emils Cheese Pizza", "12.25"),
            ("Knorr Creamy Chicken", "1.26"),
            ("Doritos Nacho Cheese", "3.35"),
            ("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
    )
}

/// The M&M Corner Market receipt, worth 109 points.
pub fn corner_market_json() -> Value {
    receipt_json(
        "M&M Corner Market",
        "2022-03-20",
        "14:33",
        "9.00",
        vec![
            ("Gatorade", "2.25"),
            ("Gatorade", "2.25"),
            ("Gatorade", "2.25"),
            ("Gatorade", "2.25"),
        ],
    )
}

/// Validates `raw`, panicking if it is rejected.
pub fn receipt(raw: &Value) -> Receipt {
    validate(raw).unwrap()
}
