//! Tests for HTTP error mapping.

use super::*;
use crate::domain::TraceId;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde::Deserialize;

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::new(ErrorCode::InvalidQuery, "offset too large"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::new(ErrorCode::InternalError, "boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn not_found_has_an_empty_body() {
    let trace_id = TraceId::generate();
    let expected_trace_id = trace_id.to_string();
    let err = TraceId::scope(trace_id, async { Error::not_found("article 3 not found") }).await;
    let response = ResponseError::error_response(&err);
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(expected_trace_id.as_str())
    );
    let bytes = to_bytes(response.into_body()).await.expect("body");
    assert!(bytes.is_empty());
}

#[rstest]
#[case(Error::invalid_request("title must not be empty"), StatusCode::BAD_REQUEST)]
#[case(
    Error::new(ErrorCode::InternalError, "store query failed: database error"),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[actix_web::test]
async fn other_failures_carry_their_message(#[case] err: Error, #[case] status: StatusCode) {
    let response = ResponseError::error_response(&err);
    assert_eq!(response.status(), status);
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let payload: Error = serde_json::from_slice(&bytes).expect("error JSON");
    assert_eq!(payload.message(), err.message());
    assert_eq!(payload.code(), err.code());
}

#[derive(Debug, Deserialize)]
struct Body {
    #[expect(dead_code, reason = "presence is what the extractor checks")]
    title: String,
}

async fn echo(_body: web::Json<Body>, _id: web::Path<i64>) -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[rstest]
#[case::missing_field(r#"{"content":"x"}"#, "/1")]
#[case::not_json("title=x", "/1")]
#[case::wrong_type(r#"{"title":5}"#, "/1")]
#[case::bad_path(r#"{"title":"x"}"#, "/abc")]
#[actix_web::test]
async fn extractor_failures_become_invalid_request(#[case] body: &str, #[case] uri: &str) {
    let app = actix_test::init_service(
        App::new()
            .configure(configure_extractors)
            .route("/{id}", web::post().to(echo)),
    )
    .await;
    let req = actix_test::TestRequest::post()
        .uri(uri)
        .insert_header(("content-type", "application/json"))
        .set_payload(body.to_owned())
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Error = actix_test::read_body_json(res).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
}
