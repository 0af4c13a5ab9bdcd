//! Student candidates.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Reference, Resource, ResourceKind, restrict_links};
use crate::domain::validation::{optional_email, optional_text, required_text};
use crate::domain::{AuditTrail, FieldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub name_kana: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub university_id: Option<Uuid>,
    pub faculty_id: Option<Uuid>,
    pub recruit_year_id: Option<Uuid>,
}

/// A student in the recruiting pipeline.
///
/// Deleting a student removes their educational backgrounds with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    id: Uuid,
    #[schema(example = "Hanako Yamada")]
    name: String,
    #[schema(example = "ヤマダ ハナコ")]
    name_kana: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    university_id: Option<Uuid>,
    faculty_id: Option<Uuid>,
    recruit_year_id: Option<Uuid>,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl Student {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_kana(&self) -> Option<&str> {
        self.name_kana.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn university_id(&self) -> Option<Uuid> {
        self.university_id
    }

    pub fn faculty_id(&self) -> Option<Uuid> {
        self.faculty_id
    }

    pub fn recruit_year_id(&self) -> Option<Uuid> {
        self.recruit_year_id
    }
}

impl Resource for Student {
    type Draft = StudentDraft;

    const KIND: ResourceKind = ResourceKind::Student;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: StudentDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            name: draft.name,
            name_kana: draft.name_kana,
            email: draft.email,
            phone: draft.phone,
            university_id: draft.university_id,
            faculty_id: draft.faculty_id,
            recruit_year_id: draft.recruit_year_id,
            audit,
        }
    }

    fn validate(draft: StudentDraft) -> Result<StudentDraft, FieldError> {
        Ok(StudentDraft {
            name: required_text("name", &draft.name)?,
            name_kana: optional_text("nameKana", draft.name_kana.as_deref())?,
            email: optional_email("email", draft.email.as_deref())?,
            phone: optional_text("phone", draft.phone.as_deref())?,
            university_id: draft.university_id,
            faculty_id: draft.faculty_id,
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
            (ResourceKind::University, self.university_id),
            (ResourceKind::Faculty, self.faculty_id),
            (ResourceKind::RecruitYear, self.recruit_year_id),
        ])
    }
}
