//! Tests for domain error construction and trace propagation.

use super::*;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("nope"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_substitutes_fallback_for_blank_message() {
    let error = Error::new(ErrorCode::NotFound, "");
    assert_eq!(error.message(), "Not Found");
}

#[rstest]
fn validation_collects_field_errors() {
    let error = Error::validation(vec![
        FieldError::new("bagNo", "Bag number is required"),
        FieldError::new("numberOfClothes", "Number of clothes must be between 1 and 50"),
    ]);

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "Validation failed");
    assert_eq!(error.field_errors().len(), 2);
    assert_eq!(error.field_errors()[0].field, "bagNo");
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::conflict("Email already exists") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn with_trace_id_overrides_captured_value(expected_trace_id: String) {
    let error = Error::not_found("Order not found").with_trace_id(expected_trace_id.clone());
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}
