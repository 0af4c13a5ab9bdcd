//! Request bodies for resource writes.
//!
//! Bodies are camelCase JSON. Missing fields fall back to empty values so the
//! domain validators can report them per field instead of failing the whole
//! payload. Required numbers have no neutral value, so they are optional here
//! and rejected as `empty` when absent. Identifier fields are strings parsed here, which gives callers
//! `invalid_uuid` details naming the offending field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::entities::{
    CompanyDraft, DepartmentDraft, DeviationValueDraft, EducationalBackgroundDraft,
    EventLocationDraft, FacultyDraft, InterviewerDraft, RecruitYearDraft, SearchConditionDraft,
    StudentDraft, TeacherDraft, UniversityDraft,
};
use crate::domain::{Error, FieldCode, FieldError, UserDraft};
use crate::inbound::http::validation::{FieldName, parse_optional_uuid, parse_uuid};

/// Conversion from a request body into a domain draft.
pub trait DraftBody {
    type Draft;

    /// Parse identifiers and hand raw text to the domain.
    fn into_draft(self) -> Result<Self::Draft, Error>;
}

const DEPARTMENT_ID: FieldName = FieldName::new("departmentId");
const UNIVERSITY_ID: FieldName = FieldName::new("universityId");
const FACULTY_ID: FieldName = FieldName::new("facultyId");
const RECRUIT_YEAR_ID: FieldName = FieldName::new("recruitYearId");
const STUDENT_ID: FieldName = FieldName::new("studentId");

/// Editable user fields for `PUT /users/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UserBody {
    #[schema(example = "hanako@example.com")]
    pub email: String,
    #[schema(example = "Hanako Yamada")]
    pub name: String,
    #[schema(format = Uuid)]
    pub department_id: Option<String>,
}

impl DraftBody for UserBody {
    type Draft = UserDraft;

    fn into_draft(self) -> Result<UserDraft, Error> {
        Ok(UserDraft {
            email: self.email,
            name: self.name,
            department_id: parse_optional_uuid(self.department_id.as_deref(), DEPARTMENT_ID)?,
        })
    }
}

/// New account for `POST /users`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateUserBody {
    #[serde(flatten)]
    pub user: UserBody,
    /// Initial password, 8 to 128 characters.
    #[schema(example = "correct horse battery")]
    pub password: String,
}

/// Password change for `PUT /users/{id}/password`.
///
/// `currentPassword` is required when changing your own password.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PasswordChangeBody {
    pub current_password: Option<String>,
    pub new_password: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DepartmentBody {
    #[schema(example = "Human Resources")]
    pub name: String,
}

impl DraftBody for DepartmentBody {
    type Draft = DepartmentDraft;

    fn into_draft(self) -> Result<DepartmentDraft, Error> {
        Ok(DepartmentDraft { name: self.name })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EventLocationBody {
    #[schema(example = "Tokyo Head Office")]
    pub name: String,
    pub address: Option<String>,
    pub capacity: Option<u32>,
}

impl DraftBody for EventLocationBody {
    type Draft = EventLocationDraft;

    fn into_draft(self) -> Result<EventLocationDraft, Error> {
        Ok(EventLocationDraft {
            name: self.name,
            address: self.address,
            capacity: self.capacity,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConditionBody {
    pub name: String,
    /// Arbitrary JSON object of filters.
    #[schema(value_type = Object)]
    pub conditions: Value,
}

impl DraftBody for SearchConditionBody {
    type Draft = SearchConditionDraft;

    fn into_draft(self) -> Result<SearchConditionDraft, Error> {
        Ok(SearchConditionDraft {
            name: self.name,
            conditions: self.conditions,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UniversityBody {
    #[schema(example = "Kyoto University")]
    pub name: String,
}

impl DraftBody for UniversityBody {
    type Draft = UniversityDraft;

    fn into_draft(self) -> Result<UniversityDraft, Error> {
        Ok(UniversityDraft { name: self.name })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FacultyBody {
    #[schema(format = Uuid)]
    pub university_id: String,
    #[schema(example = "Faculty of Law")]
    pub name: String,
}

impl DraftBody for FacultyBody {
    type Draft = FacultyDraft;

    fn into_draft(self) -> Result<FacultyDraft, Error> {
        Ok(FacultyDraft {
            university_id: parse_uuid(&self.university_id, UNIVERSITY_ID)?,
            name: self.name,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviationValueBody {
    #[schema(format = Uuid)]
    pub faculty_id: String,
    #[schema(example = 62.5, value_type = f64)]
    pub value: Option<f64>,
    pub source: Option<String>,
}

impl DraftBody for DeviationValueBody {
    type Draft = DeviationValueDraft;

    fn into_draft(self) -> Result<DeviationValueDraft, Error> {
        let faculty_id = parse_uuid(&self.faculty_id, FACULTY_ID)?;
        let value = self
            .value
            .ok_or_else(|| FieldError::new("value", FieldCode::Empty, "value is required"))?;
        Ok(DeviationValueDraft {
            faculty_id,
            value,
            source: self.source,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RecruitYearBody {
    #[schema(example = 2027)]
    pub year: i32,
    #[schema(example = "Class of 2027")]
    pub name: String,
    pub is_active: bool,
}

impl DraftBody for RecruitYearBody {
    type Draft = RecruitYearDraft;

    fn into_draft(self) -> Result<RecruitYearDraft, Error> {
        Ok(RecruitYearDraft {
            year: self.year,
            name: self.name,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyBody {
    pub name: String,
    pub industry: Option<String>,
}

impl DraftBody for CompanyBody {
    type Draft = CompanyDraft;

    fn into_draft(self) -> Result<CompanyDraft, Error> {
        Ok(CompanyDraft {
            name: self.name,
            industry: self.industry,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentBody {
    pub name: String,
    pub name_kana: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(format = Uuid)]
    pub university_id: Option<String>,
    #[schema(format = Uuid)]
    pub faculty_id: Option<String>,
    #[schema(format = Uuid)]
    pub recruit_year_id: Option<String>,
}

impl DraftBody for StudentBody {
    type Draft = StudentDraft;

    fn into_draft(self) -> Result<StudentDraft, Error> {
        Ok(StudentDraft {
            university_id: parse_optional_uuid(self.university_id.as_deref(), UNIVERSITY_ID)?,
            faculty_id: parse_optional_uuid(self.faculty_id.as_deref(), FACULTY_ID)?,
            recruit_year_id: parse_optional_uuid(
                self.recruit_year_id.as_deref(),
                RECRUIT_YEAR_ID,
            )?,
            name: self.name,
            name_kana: self.name_kana,
            email: self.email,
            phone: self.phone,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TeacherBody {
    pub name: String,
    pub school_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl DraftBody for TeacherBody {
    type Draft = TeacherDraft;

    fn into_draft(self) -> Result<TeacherDraft, Error> {
        Ok(TeacherDraft {
            name: self.name,
            school_name: self.school_name,
            email: self.email,
            phone: self.phone,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct InterviewerBody {
    pub name: String,
    pub email: Option<String>,
    #[schema(format = Uuid)]
    pub department_id: Option<String>,
    #[schema(format = Uuid)]
    pub recruit_year_id: Option<String>,
}

impl DraftBody for InterviewerBody {
    type Draft = InterviewerDraft;

    fn into_draft(self) -> Result<InterviewerDraft, Error> {
        Ok(InterviewerDraft {
            department_id: parse_optional_uuid(self.department_id.as_deref(), DEPARTMENT_ID)?,
            recruit_year_id: parse_optional_uuid(
                self.recruit_year_id.as_deref(),
                RECRUIT_YEAR_ID,
            )?,
            name: self.name,
            email: self.email,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationalBackgroundBody {
    #[schema(format = Uuid)]
    pub student_id: String,
    pub school_name: String,
    pub department_name: Option<String>,
    #[schema(example = 2021)]
    pub admission_year: Option<i32>,
    #[schema(example = 2025)]
    pub graduation_year: Option<i32>,
}

impl DraftBody for EducationalBackgroundBody {
    type Draft = EducationalBackgroundDraft;

    fn into_draft(self) -> Result<EducationalBackgroundDraft, Error> {
        Ok(EducationalBackgroundDraft {
            student_id: parse_uuid(&self.student_id, STUDENT_ID)?,
            school_name: self.school_name,
            department_name: self.department_name,
            admission_year: self.admission_year,
            graduation_year: self.graduation_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    #[rstest]
    fn missing_fields_default_to_empty_values() {
        let body: DepartmentBody = serde_json::from_value(json!({})).expect("empty object");
        assert_eq!(body.into_draft().expect("draft").name, "");
    }

    #[rstest]
    fn nested_identifiers_are_parsed() {
        let university_id = Uuid::new_v4();
        let body: FacultyBody = serde_json::from_value(json!({
            "universityId": university_id.to_string(),
            "name": "Law",
        }))
        .expect("faculty body");

        let draft = body.into_draft().expect("draft");
        assert_eq!(draft.university_id, university_id);
    }

    #[rstest]
    fn malformed_identifier_names_the_field() {
        let body: StudentBody = serde_json::from_value(json!({
            "name": "Hanako",
            "recruitYearId": "2027",
        }))
        .expect("student body");

        let err = body.into_draft().expect_err("invalid uuid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "recruitYearId", "value": "2027", "code": "invalid_uuid"}))
        );
    }

    #[rstest]
    fn deviation_value_has_no_numeric_default() {
        let body: DeviationValueBody = serde_json::from_value(json!({
            "facultyId": Uuid::new_v4().to_string(),
        }))
        .expect("deviation value body");

        let err = body.into_draft().expect_err("value is required");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "value", "code": "empty"}))
        );
    }

    #[rstest]
    fn create_user_body_flattens_user_fields() {
        let body: CreateUserBody = serde_json::from_value(json!({
            "email": "hanako@example.com",
            "name": "Hanako",
            "password": "correct horse",
        }))
        .expect("create user body");

        assert_eq!(body.user.email, "hanako@example.com");
        assert_eq!(body.password, "correct horse");
    }
}
