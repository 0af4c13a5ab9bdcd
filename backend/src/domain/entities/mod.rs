//! Master-data and recruiting entities.
//!
//! One module per resource. Each holds the entity, its draft and the draft's
//! validation rules; the shared behaviour lives on [`crate::domain::Resource`].

mod company;
mod department;
mod deviation_value;
mod educational_background;
mod event_location;
mod faculty;
mod interviewer;
mod recruit_year;
mod search_condition;
mod student;
mod teacher;
mod university;

pub use company::{Company, CompanyDraft};
pub use department::{Department, DepartmentDraft};
pub use deviation_value::{DEVIATION_MAX, DEVIATION_MIN, DeviationValue, DeviationValueDraft};
pub use educational_background::{EducationalBackground, EducationalBackgroundDraft};
pub use event_location::{CAPACITY_MAX, EventLocation, EventLocationDraft};
pub use faculty::{Faculty, FacultyDraft};
pub use interviewer::{Interviewer, InterviewerDraft};
pub use recruit_year::{RECRUIT_YEAR_MAX, RECRUIT_YEAR_MIN, RecruitYear, RecruitYearDraft};
pub use search_condition::{SearchCondition, SearchConditionDraft};
pub use student::{Student, StudentDraft};
pub use teacher::{Teacher, TeacherDraft};
pub use university::{University, UniversityDraft};
