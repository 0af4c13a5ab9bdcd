//! The error every driving port returns.
//!
//! `Error` carries a category, a client-facing message, optional structured
//! details and the trace id of the request that raised it. It knows nothing
//! about HTTP; `inbound::http::error` chooses status codes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::TraceId;

const FALLBACK_MESSAGE: &str = "unspecified error";

/// Failure category, `snake_case` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed input or a failed field validation.
    InvalidRequest,
    /// No signed-in user.
    Unauthorized,
    /// Signed in but the supplied proof was wrong.
    Forbidden,
    NotFound,
    /// Duplicate key, or a delete blocked by referencing rows.
    Conflict,
    /// The database could not be reached.
    ServiceUnavailable,
    InternalError,
}

/// Domain error payload. The message is never blank.
///
/// ```
/// use recruit_admin::domain::{Error, ErrorCode};
/// use serde_json::json;
///
/// let err = Error::invalid_request("name must not be empty")
///     .with_details(json!({"field": "name", "code": "empty"}));
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.details().and_then(|d| d.get("field")), Some(&json!("name")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

/// Reasons a serialised error payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorPayloadError {
    #[error("error message must not be empty")]
    EmptyMessage,
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

macro_rules! constructors {
    ($($(#[$meta:meta])* $name:ident => $code:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorCode::$code, message)
            }
        )+
    };
}

impl Error {
    /// Build an error in the current trace scope. A blank message is
    /// replaced with a generic one.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            code,
            message: if message.trim().is_empty() {
                FALLBACK_MESSAGE.to_owned()
            } else {
                message
            },
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    constructors! {
        invalid_request => InvalidRequest,
        unauthorized => Unauthorized,
        forbidden => Forbidden,
        not_found => NotFound,
        conflict => Conflict,
        service_unavailable => ServiceUnavailable,
        /// Adapters redact the message before it leaves the process.
        internal => InternalError,
    }

    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the captured trace id.
    #[must_use]
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        Self {
            trace_id: Some(id.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(error: Error) -> Self {
        let Error {
            code,
            message,
            trace_id,
            details,
        } = error;
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

/// Decoding never captures the ambient trace id; the payload is taken as is.
impl TryFrom<ErrorDto> for Error {
    type Error = ErrorPayloadError;

    fn try_from(dto: ErrorDto) -> Result<Self, Self::Error> {
        if dto.message.trim().is_empty() {
            return Err(ErrorPayloadError::EmptyMessage);
        }
        if dto.trace_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(ErrorPayloadError::EmptyTraceId);
        }
        Ok(Self {
            code: dto.code,
            message: dto.message,
            trace_id: dto.trace_id,
            details: dto.details,
        })
    }
}
