//! Organisational departments that users and interviewers belong to.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::validation::required_text;
use crate::domain::{AuditTrail, FieldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentDraft {
    pub name: String,
}

/// A department, unique by case-insensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    id: Uuid,
    #[schema(example = "Human Resources")]
    name: String,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl Department {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for Department {
    type Draft = DepartmentDraft;

    const KIND: ResourceKind = ResourceKind::Department;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: DepartmentDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            name: draft.name,
            audit,
        }
    }

    fn validate(draft: DepartmentDraft) -> Result<DepartmentDraft, FieldError> {
        Ok(DepartmentDraft {
            name: required_text("name", &draft.name)?,
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.name.to_lowercase())
    }
}
