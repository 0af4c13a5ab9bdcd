//! Entrance-exam deviation scores (hensachi) per faculty.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Reference, Resource, ResourceKind};
use crate::domain::validation::{FieldCode, in_range, optional_text};
use crate::domain::{AuditTrail, FieldError};

/// Lowest accepted score.
pub const DEVIATION_MIN: f64 = 0.0;
/// Highest accepted score.
pub const DEVIATION_MAX: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DeviationValueDraft {
    pub faculty_id: Uuid,
    pub value: f64,
    pub source: Option<String>,
}

/// A published deviation score for one faculty.
///
/// Listings are ordered by score; keywords match `source`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviationValue {
    id: Uuid,
    faculty_id: Uuid,
    #[schema(example = 62.5)]
    value: f64,
    source: Option<String>,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl DeviationValue {
    pub fn faculty_id(&self) -> Uuid {
        self.faculty_id
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl Resource for DeviationValue {
    type Draft = DeviationValueDraft;

    const KIND: ResourceKind = ResourceKind::DeviationValue;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: DeviationValueDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            faculty_id: draft.faculty_id,
            value: draft.value,
            source: draft.source,
            audit,
        }
    }

    fn validate(draft: DeviationValueDraft) -> Result<DeviationValueDraft, FieldError> {
        if !draft.value.is_finite() {
            return Err(FieldError::new(
                "value",
                FieldCode::OutOfRange,
                "value must be a finite number",
            ));
        }
        Ok(DeviationValueDraft {
            faculty_id: draft.faculty_id,
            value: in_range("value", draft.value, DEVIATION_MIN, DEVIATION_MAX)?,
            source: optional_text("source", draft.source.as_deref())?,
        })
    }

    fn label(&self) -> String {
        self.source.clone().unwrap_or_default()
    }

    fn sort_key(&self) -> String {
        // Zero-padded so lexical order matches numeric order within 0..=100.
        format!("{:07.3}", self.value)
    }

    fn parent_id(&self) -> Option<Uuid> {
        Some(self.faculty_id)
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::restrict(ResourceKind::Faculty, self.faculty_id)]
    }
}
