//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Each table has three shapes:
//!
//! - `*Row`: what a `SELECT`/`RETURNING` yields, converted with
//!   [`ResourceRow::into_resource`].
//! - `*Changes`: editable columns plus the `updated_*` audit half. Used as the
//!   `UPDATE` changeset and embedded in inserts. `None` writes `NULL`.
//! - `New*Row`: the changes plus id and the `created_*` audit half.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{
    Company, CompanyDraft, Department, DepartmentDraft, DeviationValue, DeviationValueDraft,
    EducationalBackground, EducationalBackgroundDraft, EventLocation, EventLocationDraft, Faculty,
    FacultyDraft, Interviewer, InterviewerDraft, RecruitYear, RecruitYearDraft, SearchCondition,
    SearchConditionDraft, Student, StudentDraft, Teacher, TeacherDraft, University,
    UniversityDraft,
};
use crate::domain::ports::ResourceRepositoryError;
use crate::domain::{AuditStamp, AuditTrail, Resource, User, UserDraft, UserId};

use super::schema::{
    companies, departments, deviation_values, educational_backgrounds, event_locations,
    faculties, interviewers, recruit_years, search_conditions, seed_runs, students, teachers,
    universities, users,
};

/// A selected row that maps onto a domain resource.
pub(crate) trait ResourceRow: Sized {
    type Resource: Resource;

    fn into_resource(self) -> Result<Self::Resource, ResourceRepositoryError>;
}

/// Column values derived from a validated draft.
pub(crate) trait DraftChanges<'a>: Sized {
    type Resource: Resource;

    fn from_draft(
        draft: &'a <Self::Resource as Resource>::Draft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError>;
}

fn actor_column(stamp: &AuditStamp) -> Option<Uuid> {
    stamp.actor().map(Uuid::from)
}

fn audit_trail(
    created_by: Option<Uuid>,
    updated_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> AuditTrail {
    AuditTrail::from_parts(
        created_by.map(UserId::from_uuid),
        updated_by.map(UserId::from_uuid),
        created_at,
        updated_at,
    )
}

/// Declares the insert row for a table: id, creation audit and the embedded
/// changes.
macro_rules! new_row {
    ($name:ident, $changes:ident, $table:ident) => {
        #[derive(Debug, Clone, Insertable)]
        #[diesel(table_name = $table)]
        pub(crate) struct $name<'a> {
            pub id: Uuid,
            pub created_by: Option<Uuid>,
            pub created_at: DateTime<Utc>,
            #[diesel(embed)]
            pub changes: $changes<'a>,
        }

        impl<'a> $name<'a> {
            pub fn new(id: Uuid, stamp: &AuditStamp, changes: $changes<'a>) -> Self {
                Self {
                    id,
                    created_by: actor_column(stamp),
                    created_at: stamp.at(),
                    changes,
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// User columns without the password hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub department_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for UserRow {
    type Resource = User;

    fn into_resource(self) -> Result<User, ResourceRepositoryError> {
        Ok(User::assemble(
            self.id,
            UserDraft {
                email: self.email,
                name: self.name,
                department_id: self.department_id,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub(crate) struct UserChanges<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub department_id: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for UserChanges<'a> {
    type Resource = User;

    fn from_draft(draft: &'a UserDraft, stamp: &AuditStamp) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            email: &draft.email,
            name: &draft.name,
            department_id: draft.department_id,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

/// Insert row for users; generic resource inserts leave the hash empty.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub password_hash: Option<&'a str>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    #[diesel(embed)]
    pub changes: UserChanges<'a>,
}

impl<'a> NewUserRow<'a> {
    pub fn new(id: Uuid, stamp: &AuditStamp, changes: UserChanges<'a>) -> Self {
        Self {
            id,
            password_hash: None,
            created_by: actor_column(stamp),
            created_at: stamp.at(),
            changes,
        }
    }

    #[must_use]
    pub fn with_password_hash(mut self, password_hash: &'a str) -> Self {
        self.password_hash = Some(password_hash);
        self
    }
}

/// Changeset for password rotation.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct PasswordChange<'a> {
    pub password_hash: &'a str,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> PasswordChange<'a> {
    pub fn new(password_hash: &'a str, stamp: &AuditStamp) -> Self {
        Self {
            password_hash,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        }
    }
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DepartmentRow {
    pub id: Uuid,
    pub name: String,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for DepartmentRow {
    type Resource = Department;

    fn into_resource(self) -> Result<Department, ResourceRepositoryError> {
        Ok(Department::assemble(
            self.id,
            DepartmentDraft { name: self.name },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = departments, treat_none_as_null = true)]
pub(crate) struct DepartmentChanges<'a> {
    pub name: &'a str,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for DepartmentChanges<'a> {
    type Resource = Department;

    fn from_draft(
        draft: &'a DepartmentDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            name: &draft.name,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewDepartmentRow, DepartmentChanges, departments);

// ---------------------------------------------------------------------------
// Event locations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = event_locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventLocationRow {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for EventLocationRow {
    type Resource = EventLocation;

    fn into_resource(self) -> Result<EventLocation, ResourceRepositoryError> {
        let capacity = self
            .capacity
            .map(u32::try_from)
            .transpose()
            .map_err(|_| ResourceRepositoryError::query("stored capacity is negative"))?;
        Ok(EventLocation::assemble(
            self.id,
            EventLocationDraft {
                name: self.name,
                address: self.address,
                capacity,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = event_locations, treat_none_as_null = true)]
pub(crate) struct EventLocationChanges<'a> {
    pub name: &'a str,
    pub address: Option<&'a str>,
    pub capacity: Option<i32>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for EventLocationChanges<'a> {
    type Resource = EventLocation;

    fn from_draft(
        draft: &'a EventLocationDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        let capacity = draft
            .capacity
            .map(i32::try_from)
            .transpose()
            .map_err(|_| ResourceRepositoryError::query("capacity exceeds storage range"))?;
        Ok(Self {
            name: &draft.name,
            address: draft.address.as_deref(),
            capacity,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewEventLocationRow, EventLocationChanges, event_locations);

// ---------------------------------------------------------------------------
// Search conditions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = search_conditions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SearchConditionRow {
    pub id: Uuid,
    pub name: String,
    pub conditions: serde_json::Value,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for SearchConditionRow {
    type Resource = SearchCondition;

    fn into_resource(self) -> Result<SearchCondition, ResourceRepositoryError> {
        Ok(SearchCondition::assemble(
            self.id,
            SearchConditionDraft {
                name: self.name,
                conditions: self.conditions,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = search_conditions, treat_none_as_null = true)]
pub(crate) struct SearchConditionChanges<'a> {
    pub name: &'a str,
    pub conditions: &'a serde_json::Value,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for SearchConditionChanges<'a> {
    type Resource = SearchCondition;

    fn from_draft(
        draft: &'a SearchConditionDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            name: &draft.name,
            conditions: &draft.conditions,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewSearchConditionRow, SearchConditionChanges, search_conditions);

// ---------------------------------------------------------------------------
// Universities and faculties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = universities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UniversityRow {
    pub id: Uuid,
    pub name: String,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for UniversityRow {
    type Resource = University;

    fn into_resource(self) -> Result<University, ResourceRepositoryError> {
        Ok(University::assemble(
            self.id,
            UniversityDraft { name: self.name },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = universities, treat_none_as_null = true)]
pub(crate) struct UniversityChanges<'a> {
    pub name: &'a str,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for UniversityChanges<'a> {
    type Resource = University;

    fn from_draft(
        draft: &'a UniversityDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            name: &draft.name,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewUniversityRow, UniversityChanges, universities);

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = faculties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FacultyRow {
    pub id: Uuid,
    pub university_id: Uuid,
    pub name: String,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for FacultyRow {
    type Resource = Faculty;

    fn into_resource(self) -> Result<Faculty, ResourceRepositoryError> {
        Ok(Faculty::assemble(
            self.id,
            FacultyDraft {
                university_id: self.university_id,
                name: self.name,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = faculties, treat_none_as_null = true)]
pub(crate) struct FacultyChanges<'a> {
    pub university_id: Uuid,
    pub name: &'a str,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for FacultyChanges<'a> {
    type Resource = Faculty;

    fn from_draft(
        draft: &'a FacultyDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            university_id: draft.university_id,
            name: &draft.name,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewFacultyRow, FacultyChanges, faculties);

// ---------------------------------------------------------------------------
// Deviation values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = deviation_values)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DeviationValueRow {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub value: f64,
    pub source: Option<String>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for DeviationValueRow {
    type Resource = DeviationValue;

    fn into_resource(self) -> Result<DeviationValue, ResourceRepositoryError> {
        Ok(DeviationValue::assemble(
            self.id,
            DeviationValueDraft {
                faculty_id: self.faculty_id,
                value: self.value,
                source: self.source,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = deviation_values, treat_none_as_null = true)]
pub(crate) struct DeviationValueChanges<'a> {
    pub faculty_id: Uuid,
    pub value: f64,
    pub source: Option<&'a str>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for DeviationValueChanges<'a> {
    type Resource = DeviationValue;

    fn from_draft(
        draft: &'a DeviationValueDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            faculty_id: draft.faculty_id,
            value: draft.value,
            source: draft.source.as_deref(),
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewDeviationValueRow, DeviationValueChanges, deviation_values);

// ---------------------------------------------------------------------------
// Recruit years and companies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recruit_years)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecruitYearRow {
    pub id: Uuid,
    pub year: i32,
    pub name: String,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for RecruitYearRow {
    type Resource = RecruitYear;

    fn into_resource(self) -> Result<RecruitYear, ResourceRepositoryError> {
        Ok(RecruitYear::assemble(
            self.id,
            RecruitYearDraft {
                year: self.year,
                name: self.name,
                is_active: self.is_active,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = recruit_years, treat_none_as_null = true)]
pub(crate) struct RecruitYearChanges<'a> {
    pub year: i32,
    pub name: &'a str,
    pub is_active: bool,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for RecruitYearChanges<'a> {
    type Resource = RecruitYear;

    fn from_draft(
        draft: &'a RecruitYearDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            year: draft.year,
            name: &draft.name,
            is_active: draft.is_active,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewRecruitYearRow, RecruitYearChanges, recruit_years);

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub industry: Option<String>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for CompanyRow {
    type Resource = Company;

    fn into_resource(self) -> Result<Company, ResourceRepositoryError> {
        Ok(Company::assemble(
            self.id,
            CompanyDraft {
                name: self.name,
                industry: self.industry,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = companies, treat_none_as_null = true)]
pub(crate) struct CompanyChanges<'a> {
    pub name: &'a str,
    pub industry: Option<&'a str>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for CompanyChanges<'a> {
    type Resource = Company;

    fn from_draft(
        draft: &'a CompanyDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            name: &draft.name,
            industry: draft.industry.as_deref(),
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewCompanyRow, CompanyChanges, companies);

// ---------------------------------------------------------------------------
// Students and their schooling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub name_kana: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub university_id: Option<Uuid>,
    pub faculty_id: Option<Uuid>,
    pub recruit_year_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for StudentRow {
    type Resource = Student;

    fn into_resource(self) -> Result<Student, ResourceRepositoryError> {
        Ok(Student::assemble(
            self.id,
            StudentDraft {
                name: self.name,
                name_kana: self.name_kana,
                email: self.email,
                phone: self.phone,
                university_id: self.university_id,
                faculty_id: self.faculty_id,
                recruit_year_id: self.recruit_year_id,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = students, treat_none_as_null = true)]
pub(crate) struct StudentChanges<'a> {
    pub name: &'a str,
    pub name_kana: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub university_id: Option<Uuid>,
    pub faculty_id: Option<Uuid>,
    pub recruit_year_id: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for StudentChanges<'a> {
    type Resource = Student;

    fn from_draft(
        draft: &'a StudentDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            name: &draft.name,
            name_kana: draft.name_kana.as_deref(),
            email: draft.email.as_deref(),
            phone: draft.phone.as_deref(),
            university_id: draft.university_id,
            faculty_id: draft.faculty_id,
            recruit_year_id: draft.recruit_year_id,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewStudentRow, StudentChanges, students);

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = educational_backgrounds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EducationalBackgroundRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub school_name: String,
    pub department_name: Option<String>,
    pub admission_year: Option<i32>,
    pub graduation_year: Option<i32>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for EducationalBackgroundRow {
    type Resource = EducationalBackground;

    fn into_resource(self) -> Result<EducationalBackground, ResourceRepositoryError> {
        Ok(EducationalBackground::assemble(
            self.id,
            EducationalBackgroundDraft {
                student_id: self.student_id,
                school_name: self.school_name,
                department_name: self.department_name,
                admission_year: self.admission_year,
                graduation_year: self.graduation_year,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = educational_backgrounds, treat_none_as_null = true)]
pub(crate) struct EducationalBackgroundChanges<'a> {
    pub student_id: Uuid,
    pub school_name: &'a str,
    pub department_name: Option<&'a str>,
    pub admission_year: Option<i32>,
    pub graduation_year: Option<i32>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for EducationalBackgroundChanges<'a> {
    type Resource = EducationalBackground;

    fn from_draft(
        draft: &'a EducationalBackgroundDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            student_id: draft.student_id,
            school_name: &draft.school_name,
            department_name: draft.department_name.as_deref(),
            admission_year: draft.admission_year,
            graduation_year: draft.graduation_year,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(
    NewEducationalBackgroundRow,
    EducationalBackgroundChanges,
    educational_backgrounds
);

// ---------------------------------------------------------------------------
// Teachers and interviewers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = teachers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TeacherRow {
    pub id: Uuid,
    pub name: String,
    pub school_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for TeacherRow {
    type Resource = Teacher;

    fn into_resource(self) -> Result<Teacher, ResourceRepositoryError> {
        Ok(Teacher::assemble(
            self.id,
            TeacherDraft {
                name: self.name,
                school_name: self.school_name,
                email: self.email,
                phone: self.phone,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = teachers, treat_none_as_null = true)]
pub(crate) struct TeacherChanges<'a> {
    pub name: &'a str,
    pub school_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for TeacherChanges<'a> {
    type Resource = Teacher;

    fn from_draft(
        draft: &'a TeacherDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            name: &draft.name,
            school_name: &draft.school_name,
            email: draft.email.as_deref(),
            phone: draft.phone.as_deref(),
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewTeacherRow, TeacherChanges, teachers);

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = interviewers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InterviewerRow {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub department_id: Option<Uuid>,
    pub recruit_year_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResourceRow for InterviewerRow {
    type Resource = Interviewer;

    fn into_resource(self) -> Result<Interviewer, ResourceRepositoryError> {
        Ok(Interviewer::assemble(
            self.id,
            InterviewerDraft {
                name: self.name,
                email: self.email,
                department_id: self.department_id,
                recruit_year_id: self.recruit_year_id,
            },
            audit_trail(self.created_by, self.updated_by, self.created_at, self.updated_at),
        ))
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = interviewers, treat_none_as_null = true)]
pub(crate) struct InterviewerChanges<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub department_id: Option<Uuid>,
    pub recruit_year_id: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> DraftChanges<'a> for InterviewerChanges<'a> {
    type Resource = Interviewer;

    fn from_draft(
        draft: &'a InterviewerDraft,
        stamp: &AuditStamp,
    ) -> Result<Self, ResourceRepositoryError> {
        Ok(Self {
            name: &draft.name,
            email: draft.email.as_deref(),
            department_id: draft.department_id,
            recruit_year_id: draft.recruit_year_id,
            updated_by: actor_column(stamp),
            updated_at: stamp.at(),
        })
    }
}

new_row!(NewInterviewerRow, InterviewerChanges, interviewers);

// ---------------------------------------------------------------------------
// Seed runs
// ---------------------------------------------------------------------------

/// Insertable struct for recording an applied seed.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = seed_runs)]
pub(crate) struct NewSeedRunRow<'a> {
    pub seed_key: &'a str,
    pub row_count: i32,
}
