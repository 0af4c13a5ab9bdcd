//! Faculties within a university.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Reference, Resource, ResourceKind};
use crate::domain::validation::required_text;
use crate::domain::{AuditTrail, FieldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyDraft {
    pub university_id: Uuid,
    pub name: String,
}

/// A faculty; names are unique per university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    id: Uuid,
    university_id: Uuid,
    #[schema(example = "Faculty of Engineering")]
    name: String,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl Faculty {
    pub fn university_id(&self) -> Uuid {
        self.university_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for Faculty {
    type Draft = FacultyDraft;

    const KIND: ResourceKind = ResourceKind::Faculty;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: FacultyDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            university_id: draft.university_id,
            name: draft.name,
            audit,
        }
    }

    fn validate(draft: FacultyDraft) -> Result<FacultyDraft, FieldError> {
        Ok(FacultyDraft {
            university_id: draft.university_id,
            name: required_text("name", &draft.name)?,
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn parent_id(&self) -> Option<Uuid> {
        Some(self.university_id)
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.university_id, self.name.to_lowercase()))
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::restrict(
            ResourceKind::University,
            self.university_id,
        )]
    }
}
