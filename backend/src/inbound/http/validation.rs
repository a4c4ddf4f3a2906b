//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every request-shape failure (bad JSON, missing body fields, malformed
//! path segments) surfaces as `400 Validation failed` with a field list.

use actix_web::web;
use serde_json::Value;

use crate::domain::{
    BagNumber, Error, FieldError, MAX_CLOTHES, MIN_CLOTHES, OrderId, WashermanId,
};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const BAG_NO: FieldName = FieldName::new("bagNo");
pub(crate) const NUMBER_OF_CLOTHES: FieldName = FieldName::new("numberOfClothes");
pub(crate) const ORDER_ID: FieldName = FieldName::new("orderId");
pub(crate) const WASHERMAN_ID: FieldName = FieldName::new("id");
pub(crate) const STATUS: FieldName = FieldName::new("status");

const CLOTHES_RANGE_MESSAGE: &str = "Number of clothes must be between 1 and 50";

/// Accumulates field failures so a request reports all of them at once.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.push(FieldError::new(field.as_str(), message));
    }

    /// Record a failure unless `value` holds non-blank text.
    pub(crate) fn require_text(
        &mut self,
        value: Option<&str>,
        field: FieldName,
        message: &str,
    ) {
        if value.is_none_or(|raw| raw.trim().is_empty()) {
            self.push(field, message);
        }
    }

    /// `Ok(())` when nothing was recorded.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(self.0))
        }
    }
}

/// Read an integer from a JSON number or a numeric string.
fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

/// Validate a clothes count field, recording a failure when it is missing,
/// not an integer, or out of range.
pub(crate) fn clothes_count(value: Option<&Value>, errors: &mut FieldErrors) -> Option<i64> {
    let count = value
        .and_then(integer_value)
        .filter(|count| (MIN_CLOTHES..=MAX_CLOTHES).contains(count));
    if count.is_none() {
        errors.push(NUMBER_OF_CLOTHES, CLOTHES_RANGE_MESSAGE);
    }
    count
}

fn single_field_error(field: FieldName, message: &str) -> Error {
    Error::validation(vec![FieldError::new(field.as_str(), message)])
}

/// Parse a `{bagNo}` path segment.
pub(crate) fn bag_number_path(raw: &str) -> Result<BagNumber, Error> {
    if raw.trim().is_empty() {
        return Err(single_field_error(BAG_NO, "Bag number is required"));
    }
    BagNumber::parse(raw).map_err(|_| single_field_error(BAG_NO, "Invalid bag number format"))
}

/// Parse an `{orderId}` path segment.
pub(crate) fn order_id_path(raw: &str) -> Result<OrderId, Error> {
    raw.trim()
        .parse::<i32>()
        .map(OrderId::new)
        .map_err(|_| single_field_error(ORDER_ID, "Invalid order ID"))
}

/// Parse an `{id}` washerman path segment.
pub(crate) fn washerman_id_path(raw: &str) -> Result<WashermanId, Error> {
    raw.trim()
        .parse::<i32>()
        .map(WashermanId::new)
        .map_err(|_| single_field_error(WASHERMAN_ID, "Invalid washerman ID"))
}

/// JSON extractor configuration turning body parse failures into
/// validation errors instead of actix's plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let error = single_field_error(FieldName::new("body"), &err.to_string());
        actix_web::Error::from(error)
    })
}
