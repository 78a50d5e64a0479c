//! Validated decoding of untrusted request payloads. Both inbound surfaces
//! (client orders and provider notifications) arrive as arbitrary JSON and
//! fail closed on anything malformed.

use serde_json::Value;
use std::fmt;

use crate::domain::OrderItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Decodes a create-payment body: `machine_id` must be a non-empty string
/// and `items` a non-empty array of well-formed items. Rejecting a
/// non-array `items` here guarantees no provider call is made for it.
pub fn decode_create_payment(payload: &Value) -> ValidationResult<(String, Vec<OrderItem>)> {
    let machine_id = payload
        .get("machine_id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::new("machine_id", "must be a non-empty string"))?;

    let raw_items = payload
        .get("items")
        .ok_or_else(|| ValidationError::new("items", "is required"))?;
    let raw_items = raw_items
        .as_array()
        .ok_or_else(|| ValidationError::new("items", "must be an array"))?;

    if raw_items.is_empty() {
        return Err(ValidationError::new("items", "must not be empty"));
    }

    let mut items = Vec::with_capacity(raw_items.len());
    for (index, raw) in raw_items.iter().enumerate() {
        items.push(decode_item(index, raw)?);
    }

    Ok((machine_id.to_string(), items))
}

fn decode_item(index: usize, raw: &Value) -> ValidationResult<OrderItem> {
    let item: OrderItem = serde_json::from_value(raw.clone())
        .map_err(|e| ValidationError::new("items", format!("item {index} is malformed: {e}")))?;

    if item.name.is_empty() {
        return Err(ValidationError::new(
            "items",
            format!("item {index}: name must not be empty"),
        ));
    }
    if item.quantity == 0 {
        return Err(ValidationError::new(
            "items",
            format!("item {index}: quantity must be positive"),
        ));
    }
    if item.price.is_sign_negative() {
        return Err(ValidationError::new(
            "items",
            format!("item {index}: price must not be negative"),
        ));
    }

    Ok(item)
}

/// Decodes a provider notification envelope down to the two fields this
/// system consumes: `data.id` and `data.status`. Everything else in the
/// envelope is ignored; missing or mistyped fields reject the delivery.
pub fn decode_notification(payload: &Value) -> ValidationResult<(String, String)> {
    let data = payload
        .get("data")
        .filter(|v| v.is_object())
        .ok_or_else(|| ValidationError::new("data", "must be an object"))?;

    let id = data
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::new("data.id", "must be a non-empty string"))?;

    let status = data
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::new("data.status", "must be a string"))?;

    Ok((id.to_string(), status.to_string()))
}
