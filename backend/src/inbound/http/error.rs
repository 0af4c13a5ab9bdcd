//! `ResponseError` for the domain [`Error`] plus extractor error handlers.
//!
//! Every failure leaves the API as the same JSON envelope with a `trace-id`
//! header. Internal errors are logged in full and sent redacted.

use std::borrow::Cow;
use std::fmt::Display;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

const fn http_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The body clients see: internal errors lose message and details.
fn public_view(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(message = self.message(), details = ?self.details(), "internal error");
        }
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(public_view(self).as_ref())
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced in a handler");
        Self::internal(REDACTED_MESSAGE)
    }
}

/// Request parts the extractors could not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Malformed {
    Body,
    Query,
}

impl Malformed {
    const fn detail_code(self) -> &'static str {
        match self {
            Self::Body => "invalid_json",
            Self::Query => "invalid_query",
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::Body => "request body is not valid JSON",
            Self::Query => "query string is invalid",
        }
    }

    fn reject(self, reason: &dyn Display) -> actix_web::Error {
        debug!(code = self.detail_code(), %reason, "malformed request rejected");
        Error::invalid_request(self.message())
            .with_details(json!({ "code": self.detail_code() }))
            .into()
    }
}

/// `JsonConfig` error handler.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Malformed::Body.reject(&err)
}

/// `QueryConfig` error handler.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Malformed::Query.reject(&err)
}

#[cfg(test)]
mod tests;
