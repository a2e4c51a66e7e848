//! HTTP mapping for domain errors.
//!
//! `impl ResponseError for Error` is the only place an [`ErrorCode`] becomes
//! a status code. The extractor configs below route JSON, path, and query
//! parse failures through the same type so malformed requests share one
//! response envelope.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode};
use crate::middleware::TRACE_ID_HEADER;

pub use crate::domain::ApiResult;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::InvalidQuery => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                code = ?self.code(),
                trace_id = ?self.trace_id(),
                message = self.message(),
                "request failed"
            );
        } else {
            debug!(code = ?self.code(), message = self.message(), "request rejected");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        if self.code() == ErrorCode::NotFound {
            builder.finish()
        } else {
            builder.json(self)
        }
    }
}

/// Request body failures: not JSON, missing or mistyped fields.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    Error::invalid_request(format!("invalid request body: {detail}"))
        .with_details(json!({ "code": "invalid_body" }))
        .into()
}

/// Path failures, in practice a non-numeric id.
fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    Error::invalid_request(format!("invalid path parameter: {detail}"))
        .with_details(json!({ "field": "id", "code": "invalid_id" }))
        .into()
}

/// Query strings are parsed leniently, so this only fires on undecodable
/// input.
fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    Error::invalid_request(format!("invalid query string: {detail}"))
        .with_details(json!({ "code": "invalid_query_string" }))
        .into()
}

/// Extractor configuration routing parse failures through [`Error`].
///
/// Register on the application (or a scope) with `App::configure`.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}

#[cfg(test)]
mod tests;
