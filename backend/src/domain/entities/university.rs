//! Universities that students attend.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::validation::required_text;
use crate::domain::{AuditTrail, FieldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversityDraft {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct University {
    id: Uuid,
    #[schema(example = "Kyoto University")]
    name: String,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl University {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for University {
    type Draft = UniversityDraft;

    const KIND: ResourceKind = ResourceKind::University;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: UniversityDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            name: draft.name,
            audit,
        }
    }

    fn validate(draft: UniversityDraft) -> Result<UniversityDraft, FieldError> {
        Ok(UniversityDraft {
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
