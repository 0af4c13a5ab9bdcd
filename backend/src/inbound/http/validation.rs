//! Shared validation helpers for inbound HTTP adapters.
//!
//! Identifiers travel as strings in paths, query strings and bodies; these
//! helpers turn them into [`Uuid`]s and report failures with
//! `{field, value, code: "invalid_uuid"}` details.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, FieldCode};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": FieldCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_optional_uuid(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<Uuid>, Error> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| parse_uuid(raw, field))
        .transpose()
}
