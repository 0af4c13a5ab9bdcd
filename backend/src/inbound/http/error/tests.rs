//! Tests for the HTTP error envelope.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde::de::Error as _;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn render(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = error.error_response();
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("response body");
    let body = serde_json::from_slice(&bytes).expect("JSON body");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("sign in"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("wrong password"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("no such faculty"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("department exists"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("database down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn every_code_has_a_status(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(error.status_code(), expected);
}

#[actix_web::test]
async fn field_errors_keep_their_details() {
    let error = Error::invalid_request("name must not be empty")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "name", "code": "empty"}));

    let (status, header, body) = render(&error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "code": "invalid_request",
            "message": "name must not be empty",
            "traceId": TRACE_ID,
            "details": {"field": "name", "code": "empty"}
        })
    );
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("pool exhausted on replica 3")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"dsn": "postgres://secret"}));

    let (status, header, body) = render(&error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({"code": "internal_error", "message": REDACTED_MESSAGE, "traceId": TRACE_ID})
    );
}

#[actix_web::test]
async fn missing_trace_id_omits_the_header() {
    let (_, header, body) = render(&Error::not_found("no such student")).await;
    assert!(header.is_none());
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn public_view_borrows_non_internal_errors() {
    let conflict = Error::conflict("company exists");
    assert!(matches!(public_view(&conflict), Cow::Borrowed(_)));
}

#[rstest]
#[case::body(
    json_error_handler(JsonPayloadError::ContentType, &actix_web::test::TestRequest::default().to_http_request()),
    "invalid_json"
)]
#[case::query(
    query_error_handler(
        QueryPayloadError::Deserialize(
            serde::de::value::Error::custom("perPage: invalid digit"),
        ),
        &actix_web::test::TestRequest::default().to_http_request(),
    ),
    "invalid_query"
)]
#[actix_web::test]
async fn extractor_failures_carry_a_detail_code(
    #[case] err: actix_web::Error,
    #[case] expected: &str,
) {
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body()).await.expect("response body");
    let body: Value = serde_json::from_slice(&bytes).expect("JSON body");
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"], json!({ "code": expected }));
}

#[rstest]
fn framework_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), REDACTED_MESSAGE);
    assert!(err.details().is_none());
}
