//! Field-level validation shared by entity drafts.
//!
//! Drafts arrive with raw caller text. The helpers here trim it, enforce the
//! common length limit and report failures as [`FieldError`], which converts
//! into an `invalid_request` domain error carrying `{field, code}` details.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::json;

use super::Error;

/// Longest accepted text value, counted in characters.
pub const TEXT_MAX: usize = 255;

/// Machine-readable reason attached to a [`FieldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCode {
    Empty,
    TooLong,
    InvalidEmail,
    OutOfRange,
    NotAnObject,
    InvalidOrder,
    PasswordLength,
    InvalidUuid,
}

impl FieldCode {
    /// Wire representation used in error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong => "too_long",
            Self::InvalidEmail => "invalid_email",
            Self::OutOfRange => "out_of_range",
            Self::NotAnObject => "not_an_object",
            Self::InvalidOrder => "invalid_order",
            Self::PasswordLength => "password_length",
            Self::InvalidUuid => "invalid_uuid",
        }
    }
}

impl fmt::Display for FieldCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: &'static str,
    code: FieldCode,
    message: String,
}

impl FieldError {
    pub fn new(field: &'static str, code: FieldCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn code(&self) -> FieldCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FieldError {}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Error::invalid_request(value.message).with_details(json!({
            "field": value.field,
            "code": value.code.as_str(),
        }))
    }
}

/// Trim `value` and require it to be non-empty and within [`TEXT_MAX`].
pub fn required_text(field: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(
            field,
            FieldCode::Empty,
            format!("{field} must not be empty"),
        ));
    }
    check_length(field, trimmed)?;
    Ok(trimmed.to_owned())
}

/// Trim an optional value, collapsing blank input to `None`.
pub fn optional_text(field: &'static str, value: Option<&str>) -> Result<Option<String>, FieldError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_length(field, trimmed)?;
            Ok(Some(trimmed.to_owned()))
        }
    }
}

/// Validate and lowercase a required email address.
pub fn required_email(field: &'static str, value: &str) -> Result<String, FieldError> {
    let text = required_text(field, value)?;
    check_email(field, &text)?;
    Ok(text.to_lowercase())
}

/// Validate and lowercase an optional email address.
pub fn optional_email(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, FieldError> {
    let Some(text) = optional_text(field, value)? else {
        return Ok(None);
    };
    check_email(field, &text)?;
    Ok(Some(text.to_lowercase()))
}

/// Require `value` to fall within `min..=max`.
pub fn in_range<T>(field: &'static str, value: T, min: T, max: T) -> Result<T, FieldError>
where
    T: PartialOrd + fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(FieldError::new(
            field,
            FieldCode::OutOfRange,
            format!("{field} must be between {min} and {max}"),
        ));
    }
    Ok(value)
}

fn check_length(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.chars().count() > TEXT_MAX {
        return Err(FieldError::new(
            field,
            FieldCode::TooLong,
            format!("{field} must be at most {TEXT_MAX} characters"),
        ));
    }
    Ok(())
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One @, no whitespace, a dot somewhere in the domain.
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn check_email(field: &'static str, value: &str) -> Result<(), FieldError> {
    if email_regex().is_match(value) {
        Ok(())
    } else {
        Err(FieldError::new(
            field,
            FieldCode::InvalidEmail,
            format!("{field} must be a valid email address"),
        ))
    }
}
