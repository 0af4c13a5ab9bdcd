//! Shape shared by every administrable resource.
//!
//! Each entity module implements [`Resource`] so the generic command and
//! query services, the HTTP handlers and the storage adapters can treat all
//! thirteen resources uniformly.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::{AuditTrail, FieldError};

/// Every resource managed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    User,
    Department,
    EventLocation,
    SearchCondition,
    University,
    Faculty,
    DeviationValue,
    RecruitYear,
    Company,
    Student,
    Teacher,
    Interviewer,
    EducationalBackground,
}

impl ResourceKind {
    /// All kinds in route registration order.
    pub const ALL: [Self; 13] = [
        Self::User,
        Self::Department,
        Self::EventLocation,
        Self::SearchCondition,
        Self::University,
        Self::Faculty,
        Self::DeviationValue,
        Self::RecruitYear,
        Self::Company,
        Self::Student,
        Self::Teacher,
        Self::Interviewer,
        Self::EducationalBackground,
    ];

    /// URL path segment below `/api/v1`.
    pub const fn path(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Department => "departments",
            Self::EventLocation => "event-locations",
            Self::SearchCondition => "search-conditions",
            Self::University => "universities",
            Self::Faculty => "faculties",
            Self::DeviationValue => "deviation-values",
            Self::RecruitYear => "recruit-years",
            Self::Company => "companies",
            Self::Student => "students",
            Self::Teacher => "teachers",
            Self::Interviewer => "interviewers",
            Self::EducationalBackground => "educational-backgrounds",
        }
    }

    /// Backing table name.
    pub const fn table(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Department => "departments",
            Self::EventLocation => "event_locations",
            Self::SearchCondition => "search_conditions",
            Self::University => "universities",
            Self::Faculty => "faculties",
            Self::DeviationValue => "deviation_values",
            Self::RecruitYear => "recruit_years",
            Self::Company => "companies",
            Self::Student => "students",
            Self::Teacher => "teachers",
            Self::Interviewer => "interviewers",
            Self::EducationalBackground => "educational_backgrounds",
        }
    }

    /// Human-readable singular used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Department => "department",
            Self::EventLocation => "event location",
            Self::SearchCondition => "search condition",
            Self::University => "university",
            Self::Faculty => "faculty",
            Self::DeviationValue => "deviation value",
            Self::RecruitYear => "recruit year",
            Self::Company => "company",
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Interviewer => "interviewer",
            Self::EducationalBackground => "educational background",
        }
    }

    /// OpenAPI tag grouping the resource's operations.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Department => "departments",
            Self::EventLocation => "event-locations",
            Self::SearchCondition => "search-conditions",
            Self::University | Self::Faculty | Self::DeviationValue => "schools",
            Self::RecruitYear | Self::Company | Self::Interviewer => "recruiting",
            Self::Student | Self::Teacher | Self::EducationalBackground => "people",
        }
    }

    /// Query parameter that filters a listing by its parent, if any.
    pub const fn parent_param(self) -> Option<&'static str> {
        match self {
            Self::User => Some("departmentId"),
            Self::Faculty => Some("universityId"),
            Self::DeviationValue => Some("facultyId"),
            Self::Student | Self::Interviewer => Some("recruitYearId"),
            Self::EducationalBackground => Some("studentId"),
            Self::Department
            | Self::EventLocation
            | Self::SearchCondition
            | Self::University
            | Self::RecruitYear
            | Self::Company
            | Self::Teacher => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outgoing foreign-key style link from one row to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    target: ResourceKind,
    id: Uuid,
    cascade: bool,
}

impl Reference {
    /// Link that blocks deletion of the target while it exists.
    pub const fn restrict(target: ResourceKind, id: Uuid) -> Self {
        Self {
            target,
            id,
            cascade: false,
        }
    }

    /// Link whose owner is removed together with the target.
    pub const fn cascade(target: ResourceKind, id: Uuid) -> Self {
        Self {
            target,
            id,
            cascade: true,
        }
    }

    pub const fn target(&self) -> ResourceKind {
        self.target
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub const fn is_cascade(&self) -> bool {
        self.cascade
    }
}

/// Collect the references present among optional link fields.
pub fn restrict_links(links: &[(ResourceKind, Option<Uuid>)]) -> Vec<Reference> {
    links
        .iter()
        .filter_map(|(kind, id)| id.map(|id| Reference::restrict(*kind, id)))
        .collect()
}

/// Common behaviour of every stored entity.
pub trait Resource: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Caller-supplied fields used to create or replace the entity.
    type Draft: Clone + fmt::Debug + Send + Sync + 'static;

    const KIND: ResourceKind;

    fn id(&self) -> Uuid;

    fn audit(&self) -> &AuditTrail;

    fn audit_mut(&mut self) -> &mut AuditTrail;

    /// Build the entity from a validated draft.
    fn assemble(id: Uuid, draft: Self::Draft, audit: AuditTrail) -> Self;

    /// Normalise and check a draft before it reaches storage.
    fn validate(draft: Self::Draft) -> Result<Self::Draft, FieldError>;

    /// Text matched by listing keywords.
    fn label(&self) -> String;

    /// Listing order key. Ties are broken by id.
    fn sort_key(&self) -> String {
        self.label().to_lowercase()
    }

    /// Parent used by filtered listings.
    fn parent_id(&self) -> Option<Uuid> {
        None
    }

    /// Value that must be unique among rows of this kind.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Rows this entity points at.
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn paths_and_tables_are_distinct() {
        let paths: HashSet<_> = ResourceKind::ALL.iter().map(|kind| kind.path()).collect();
        let tables: HashSet<_> = ResourceKind::ALL.iter().map(|kind| kind.table()).collect();
        assert_eq!(paths.len(), ResourceKind::ALL.len());
        assert_eq!(tables.len(), ResourceKind::ALL.len());
    }

    #[rstest]
    #[case(ResourceKind::EventLocation, "event-locations", "event_locations")]
    #[case(ResourceKind::EducationalBackground, "educational-backgrounds", "educational_backgrounds")]
    fn path_uses_kebab_case_and_table_snake_case(
        #[case] kind: ResourceKind,
        #[case] path: &str,
        #[case] table: &str,
    ) {
        assert_eq!(kind.path(), path);
        assert_eq!(kind.table(), table);
    }

    #[rstest]
    fn restrict_links_skips_absent_ids() {
        let id = Uuid::new_v4();
        let refs = restrict_links(&[
            (ResourceKind::University, Some(id)),
            (ResourceKind::Faculty, None),
        ]);
        assert_eq!(refs, vec![Reference::restrict(ResourceKind::University, id)]);
    }
}
