//! Administrator accounts.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::resource::{Reference, Resource, ResourceKind, restrict_links};
use super::validation::{required_email, required_text};
use super::{AuditTrail, FieldError};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    #[error("user id must not be empty")]
    Empty,
    #[error("user id must be a valid UUID")]
    Invalid,
}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from caller text. Surrounding whitespace is
    /// rejected rather than trimmed.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserIdError::Empty);
        }
        if raw.trim() != raw {
            return Err(UserIdError::Invalid);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserIdError::Invalid)
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<UserId> for Uuid {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Editable user fields. Passwords travel separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub email: String,
    pub name: String,
    pub department_id: Option<Uuid>,
}

/// Application user.
///
/// ## Invariants
/// - `email` is lowercased and unique.
/// - `name` is non-empty once trimmed.
/// - Password material never appears on this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, format = Uuid)]
    id: UserId,
    #[schema(example = "admin@example.com")]
    email: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    department_id: Option<Uuid>,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl User {
    pub fn user_id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department_id(&self) -> Option<Uuid> {
        self.department_id
    }
}

impl Resource for User {
    type Draft = UserDraft;

    const KIND: ResourceKind = ResourceKind::User;

    fn id(&self) -> Uuid {
        self.id.0
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: UserDraft, audit: AuditTrail) -> Self {
        Self {
            id: UserId(id),
            email: draft.email,
            name: draft.name,
            department_id: draft.department_id,
            audit,
        }
    }

    fn validate(draft: UserDraft) -> Result<UserDraft, FieldError> {
        Ok(UserDraft {
            email: required_email("email", &draft.email)?,
            name: required_text("name", &draft.name)?,
            department_id: draft.department_id,
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn parent_id(&self) -> Option<Uuid> {
        self.department_id
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    fn references(&self) -> Vec<Reference> {
        restrict_links(&[(ResourceKind::Department, self.department_id)])
    }
}

#[cfg(test)]
mod tests;
