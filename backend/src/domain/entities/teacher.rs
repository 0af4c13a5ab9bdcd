//! High-school and university teachers the recruiting team keeps in touch with.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::validation::{optional_email, optional_text, required_text};
use crate::domain::{AuditTrail, FieldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherDraft {
    pub name: String,
    pub school_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    id: Uuid,
    name: String,
    #[schema(example = "Sapporo North High School")]
    school_name: String,
    email: Option<String>,
    phone: Option<String>,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl Teacher {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn school_name(&self) -> &str {
        &self.school_name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

impl Resource for Teacher {
    type Draft = TeacherDraft;

    const KIND: ResourceKind = ResourceKind::Teacher;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: TeacherDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            name: draft.name,
            school_name: draft.school_name,
            email: draft.email,
            phone: draft.phone,
            audit,
        }
    }

    fn validate(draft: TeacherDraft) -> Result<TeacherDraft, FieldError> {
        Ok(TeacherDraft {
            name: required_text("name", &draft.name)?,
            school_name: required_text("schoolName", &draft.school_name)?,
            email: optional_email("email", draft.email.as_deref())?,
            phone: optional_text("phone", draft.phone.as_deref())?,
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
