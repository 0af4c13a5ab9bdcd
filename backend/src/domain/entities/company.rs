//! Companies tracked for recruiting.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::validation::{optional_text, required_text};
use crate::domain::{AuditTrail, FieldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDraft {
    pub name: String,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    id: Uuid,
    #[schema(example = "Acme K.K.")]
    name: String,
    #[schema(example = "Manufacturing")]
    industry: Option<String>,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl Company {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }
}

impl Resource for Company {
    type Draft = CompanyDraft;

    const KIND: ResourceKind = ResourceKind::Company;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: CompanyDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            name: draft.name,
            industry: draft.industry,
            audit,
        }
    }

    fn validate(draft: CompanyDraft) -> Result<CompanyDraft, FieldError> {
        Ok(CompanyDraft {
            name: required_text("name", &draft.name)?,
            industry: optional_text("industry", draft.industry.as_deref())?,
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.name.to_lowercase())
    }
}
