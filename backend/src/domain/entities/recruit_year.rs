//! Recruiting seasons keyed by graduation year.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::validation::{in_range, required_text};
use crate::domain::{AuditTrail, FieldError};

/// Earliest accepted season year.
pub const RECRUIT_YEAR_MIN: i32 = 2000;
/// Latest accepted season year.
pub const RECRUIT_YEAR_MAX: i32 = 2100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecruitYearDraft {
    pub year: i32,
    pub name: String,
    pub is_active: bool,
}

/// A recruiting season; `year` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecruitYear {
    id: Uuid,
    #[schema(example = 2027)]
    year: i32,
    #[schema(example = "Class of 2027")]
    name: String,
    is_active: bool,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl RecruitYear {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Resource for RecruitYear {
    type Draft = RecruitYearDraft;

    const KIND: ResourceKind = ResourceKind::RecruitYear;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: RecruitYearDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            year: draft.year,
            name: draft.name,
            is_active: draft.is_active,
            audit,
        }
    }

    fn validate(draft: RecruitYearDraft) -> Result<RecruitYearDraft, FieldError> {
        Ok(RecruitYearDraft {
            year: in_range("year", draft.year, RECRUIT_YEAR_MIN, RECRUIT_YEAR_MAX)?,
            name: required_text("name", &draft.name)?,
            is_active: draft.is_active,
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn sort_key(&self) -> String {
        self.year.to_string()
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.year.to_string())
    }
}
