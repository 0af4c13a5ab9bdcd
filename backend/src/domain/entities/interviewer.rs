//! Staff who interview candidates during a recruiting season.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Reference, Resource, ResourceKind, restrict_links};
use crate::domain::validation::{optional_email, required_text};
use crate::domain::{AuditTrail, FieldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewerDraft {
    pub name: String,
    pub email: Option<String>,
    pub department_id: Option<Uuid>,
    pub recruit_year_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Interviewer {
    id: Uuid,
    name: String,
    email: Option<String>,
    department_id: Option<Uuid>,
    recruit_year_id: Option<Uuid>,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl Interviewer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn department_id(&self) -> Option<Uuid> {
        self.department_id
    }

    pub fn recruit_year_id(&self) -> Option<Uuid> {
        self.recruit_year_id
    }
}

impl Resource for Interviewer {
    type Draft = InterviewerDraft;

    const KIND: ResourceKind = ResourceKind::Interviewer;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: InterviewerDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            department_id: draft.department_id,
            recruit_year_id: draft.recruit_year_id,
            audit,
        }
    }

    fn validate(draft: InterviewerDraft) -> Result<InterviewerDraft, FieldError> {
        Ok(InterviewerDraft {
            name: required_text("name", &draft.name)?,
            email: optional_email("email", draft.email.as_deref())?,
            department_id: draft.department_id,
            recruit_year_id: draft.recruit_year_id,
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn parent_id(&self) -> Option<Uuid> {
        self.recruit_year_id
    }

    fn references(&self) -> Vec<Reference> {
        restrict_links(&[
            (ResourceKind::Department, self.department_id),
            (ResourceKind::RecruitYear, self.recruit_year_id),
        ])
    }
}
