//! Schooling history entries attached to a student.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Reference, Resource, ResourceKind};
use crate::domain::validation::{FieldCode, in_range, optional_text, required_text};
use crate::domain::{AuditTrail, FieldError};

const YEAR_MIN: i32 = 1900;
const YEAR_MAX: i32 = 2100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationalBackgroundDraft {
    pub student_id: Uuid,
    pub school_name: String,
    pub department_name: Option<String>,
    pub admission_year: Option<i32>,
    pub graduation_year: Option<i32>,
}

/// One school a student attended.
///
/// ## Invariants
/// - `graduation_year >= admission_year` when both are set.
/// - Removed together with the owning student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationalBackground {
    id: Uuid,
    student_id: Uuid,
    #[schema(example = "Kyoto University")]
    school_name: String,
    department_name: Option<String>,
    admission_year: Option<i32>,
    graduation_year: Option<i32>,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl EducationalBackground {
    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    pub fn school_name(&self) -> &str {
        &self.school_name
    }

    pub fn department_name(&self) -> Option<&str> {
        self.department_name.as_deref()
    }

    pub fn admission_year(&self) -> Option<i32> {
        self.admission_year
    }

    pub fn graduation_year(&self) -> Option<i32> {
        self.graduation_year
    }
}

impl Resource for EducationalBackground {
    type Draft = EducationalBackgroundDraft;

    const KIND: ResourceKind = ResourceKind::EducationalBackground;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: EducationalBackgroundDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            student_id: draft.student_id,
            school_name: draft.school_name,
            department_name: draft.department_name,
            admission_year: draft.admission_year,
            graduation_year: draft.graduation_year,
            audit,
        }
    }

    fn validate(
        draft: EducationalBackgroundDraft,
    ) -> Result<EducationalBackgroundDraft, FieldError> {
        let admission_year = draft
            .admission_year
            .map(|year| in_range("admissionYear", year, YEAR_MIN, YEAR_MAX))
            .transpose()?;
        let graduation_year = draft
            .graduation_year
            .map(|year| in_range("graduationYear", year, YEAR_MIN, YEAR_MAX))
            .transpose()?;
        if let (Some(admitted), Some(graduated)) = (admission_year, graduation_year)
            && graduated < admitted
        {
            return Err(FieldError::new(
                "graduationYear",
                FieldCode::InvalidOrder,
                "graduationYear must not be before admissionYear",
            ));
        }

        Ok(EducationalBackgroundDraft {
            student_id: draft.student_id,
            school_name: required_text("schoolName", &draft.school_name)?,
            department_name: optional_text("departmentName", draft.department_name.as_deref())?,
            admission_year,
            graduation_year,
        })
    }

    fn label(&self) -> String {
        self.school_name.clone()
    }

    fn parent_id(&self) -> Option<Uuid> {
        Some(self.student_id)
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::cascade(ResourceKind::Student, self.student_id)]
    }
}
