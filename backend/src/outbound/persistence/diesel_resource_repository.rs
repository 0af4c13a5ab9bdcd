//! PostgreSQL-backed [`ResourceRepository`] adapters.
//!
//! Every resource table has the same shape, so one macro stamps out a
//! repository per table. Listings filter with `ILIKE` on the label column and
//! optionally by the parent column, then order by the declared sort columns
//! with the id as tie-breaker.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::entities::{
    Company, Department, DeviationValue, EducationalBackground, EventLocation, Faculty,
    Interviewer, RecruitYear, SearchCondition, Student, Teacher, University,
};
use crate::domain::ports::{ResourceRepository, ResourceRepositoryError};
use crate::domain::{AuditStamp, ListQuery, Page, User};

use super::diesel_helpers::{
    Operation, contains_pattern, limit_offset, lower, map_diesel_error, map_pool_error, row_total,
};
use super::models::{
    CompanyChanges, CompanyRow, DepartmentChanges, DepartmentRow, DeviationValueChanges,
    DeviationValueRow, DraftChanges, EducationalBackgroundChanges, EducationalBackgroundRow,
    EventLocationChanges, EventLocationRow, FacultyChanges, FacultyRow, InterviewerChanges,
    InterviewerRow, NewCompanyRow, NewDepartmentRow, NewDeviationValueRow,
    NewEducationalBackgroundRow, NewEventLocationRow, NewFacultyRow, NewInterviewerRow,
    NewRecruitYearRow, NewSearchConditionRow, NewStudentRow, NewTeacherRow, NewUniversityRow,
    NewUserRow, RecruitYearChanges, RecruitYearRow, ResourceRow, SearchConditionChanges,
    SearchConditionRow, StudentChanges, StudentRow, TeacherChanges, TeacherRow,
    UniversityChanges, UniversityRow, UserChanges, UserRow,
};
use super::pool::DbPool;
use super::schema::{
    companies, departments, deviation_values, educational_backgrounds, event_locations,
    faculties, interviewers, recruit_years, search_conditions, students, teachers, universities,
    users,
};

macro_rules! diesel_resource_repository {
    (
        $(#[$meta:meta])*
        $name:ident {
            resource: $resource:ty,
            table: $table:ident,
            row: $row:ty,
            changes: $changes:ident,
            new_row: $new_row:ident,
            keyword: $keyword:ident,
            order: ($($order:expr),+ $(,)?),
            $(parent: $parent:ident,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            pool: DbPool,
        }

        impl $name {
            pub fn new(pool: DbPool) -> Self {
                Self { pool }
            }

            fn filtered(query: &ListQuery) -> $table::BoxedQuery<'static, Pg> {
                #[allow(unused_mut, reason = "only parented tables reassign twice")]
                let mut statement = $table::table.into_boxed();
                if let Some(keyword) = query.keyword() {
                    statement = statement.filter($table::$keyword.ilike(contains_pattern(keyword)));
                }
                $(
                    if let Some(parent_id) = query.parent_id() {
                        statement = statement.filter($table::$parent.eq(parent_id));
                    }
                )?
                statement
            }
        }

        #[async_trait]
        impl ResourceRepository<$resource> for $name {
            async fn list(
                &self,
                query: &ListQuery,
            ) -> Result<Page<$resource>, ResourceRepositoryError> {
                let (limit, offset) = limit_offset(query.per_page(), query.offset())?;
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;

                let total: i64 = Self::filtered(query)
                    .count()
                    .get_result(&mut conn)
                    .await
                    .map_err(|err| map_diesel_error(err, Operation::Read))?;
                let rows: Vec<$row> = Self::filtered(query)
                    .select(<$row>::as_select())
                    .order_by(($($order),+))
                    .limit(limit)
                    .offset(offset)
                    .load(&mut conn)
                    .await
                    .map_err(|err| map_diesel_error(err, Operation::Read))?;

                let items = rows
                    .into_iter()
                    .map(ResourceRow::into_resource)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Page::new(items, row_total(total)?, query))
            }

            async fn find_by_id(
                &self,
                id: Uuid,
            ) -> Result<Option<$resource>, ResourceRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<$row> = $table::table
                    .find(id)
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(|err| map_diesel_error(err, Operation::Read))?;
                row.map(ResourceRow::into_resource).transpose()
            }

            async fn insert(
                &self,
                id: Uuid,
                draft: &<$resource as crate::domain::Resource>::Draft,
                stamp: &AuditStamp,
            ) -> Result<$resource, ResourceRepositoryError> {
                let changes = $changes::from_draft(draft, stamp)?;
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: $row = diesel::insert_into($table::table)
                    .values($new_row::new(id, stamp, changes))
                    .returning(<$row>::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(|err| map_diesel_error(err, Operation::Write))?;
                row.into_resource()
            }

            async fn update(
                &self,
                id: Uuid,
                draft: &<$resource as crate::domain::Resource>::Draft,
                stamp: &AuditStamp,
            ) -> Result<Option<$resource>, ResourceRepositoryError> {
                let changes = $changes::from_draft(draft, stamp)?;
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<$row> = diesel::update($table::table.find(id))
                    .set(changes)
                    .returning(<$row>::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(|err| map_diesel_error(err, Operation::Write))?;
                row.map(ResourceRow::into_resource).transpose()
            }

            async fn delete(&self, id: Uuid) -> Result<bool, ResourceRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let deleted = diesel::delete($table::table.find(id))
                    .execute(&mut conn)
                    .await
                    .map_err(|err| map_diesel_error(err, Operation::Delete))?;
                Ok(deleted > 0)
            }
        }
    };
}

diesel_resource_repository! {
    /// Users without credentials; accounts are created through
    /// [`super::DieselCredentialRepository`].
    DieselUserRepository {
        resource: User,
        table: users,
        row: UserRow,
        changes: UserChanges,
        new_row: NewUserRow,
        keyword: name,
        order: (lower(users::name), users::id),
        parent: department_id,
    }
}

diesel_resource_repository! {
    DieselDepartmentRepository {
        resource: Department,
        table: departments,
        row: DepartmentRow,
        changes: DepartmentChanges,
        new_row: NewDepartmentRow,
        keyword: name,
        order: (lower(departments::name), departments::id),
    }
}

diesel_resource_repository! {
    DieselEventLocationRepository {
        resource: EventLocation,
        table: event_locations,
        row: EventLocationRow,
        changes: EventLocationChanges,
        new_row: NewEventLocationRow,
        keyword: name,
        order: (lower(event_locations::name), event_locations::id),
    }
}

diesel_resource_repository! {
    DieselSearchConditionRepository {
        resource: SearchCondition,
        table: search_conditions,
        row: SearchConditionRow,
        changes: SearchConditionChanges,
        new_row: NewSearchConditionRow,
        keyword: name,
        order: (lower(search_conditions::name), search_conditions::id),
    }
}

diesel_resource_repository! {
    DieselUniversityRepository {
        resource: University,
        table: universities,
        row: UniversityRow,
        changes: UniversityChanges,
        new_row: NewUniversityRow,
        keyword: name,
        order: (lower(universities::name), universities::id),
    }
}

diesel_resource_repository! {
    DieselFacultyRepository {
        resource: Faculty,
        table: faculties,
        row: FacultyRow,
        changes: FacultyChanges,
        new_row: NewFacultyRow,
        keyword: name,
        order: (lower(faculties::name), faculties::id),
        parent: university_id,
    }
}

diesel_resource_repository! {
    /// Deviation values ordered by score; keywords match the source.
    DieselDeviationValueRepository {
        resource: DeviationValue,
        table: deviation_values,
        row: DeviationValueRow,
        changes: DeviationValueChanges,
        new_row: NewDeviationValueRow,
        keyword: source,
        order: (deviation_values::value, deviation_values::id),
        parent: faculty_id,
    }
}

diesel_resource_repository! {
    /// Recruit years ordered by year.
    DieselRecruitYearRepository {
        resource: RecruitYear,
        table: recruit_years,
        row: RecruitYearRow,
        changes: RecruitYearChanges,
        new_row: NewRecruitYearRow,
        keyword: name,
        order: (recruit_years::year, recruit_years::id),
    }
}

diesel_resource_repository! {
    DieselCompanyRepository {
        resource: Company,
        table: companies,
        row: CompanyRow,
        changes: CompanyChanges,
        new_row: NewCompanyRow,
        keyword: name,
        order: (lower(companies::name), companies::id),
    }
}

diesel_resource_repository! {
    DieselStudentRepository {
        resource: Student,
        table: students,
        row: StudentRow,
        changes: StudentChanges,
        new_row: NewStudentRow,
        keyword: name,
        order: (lower(students::name), students::id),
        parent: recruit_year_id,
    }
}

diesel_resource_repository! {
    DieselTeacherRepository {
        resource: Teacher,
        table: teachers,
        row: TeacherRow,
        changes: TeacherChanges,
        new_row: NewTeacherRow,
        keyword: name,
        order: (lower(teachers::name), teachers::id),
    }
}

diesel_resource_repository! {
    DieselInterviewerRepository {
        resource: Interviewer,
        table: interviewers,
        row: InterviewerRow,
        changes: InterviewerChanges,
        new_row: NewInterviewerRow,
        keyword: name,
        order: (lower(interviewers::name), interviewers::id),
        parent: recruit_year_id,
    }
}

diesel_resource_repository! {
    /// Schooling history; deleting the student removes these rows in SQL.
    DieselEducationalBackgroundRepository {
        resource: EducationalBackground,
        table: educational_backgrounds,
        row: EducationalBackgroundRow,
        changes: EducationalBackgroundChanges,
        new_row: NewEducationalBackgroundRow,
        keyword: school_name,
        order: (
            lower(educational_backgrounds::school_name),
            educational_backgrounds::id,
        ),
        parent: student_id,
    }
}
