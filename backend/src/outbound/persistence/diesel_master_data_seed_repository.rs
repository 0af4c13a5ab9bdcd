//! PostgreSQL-backed master-data seeding adapter.
//!
//! Records the seed run and inserts every row inside one transaction, so a
//! name clash or missing reference leaves the database untouched.

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{
    MasterDataSeedRepository, MasterDataSeedRepositoryError, MasterDataSeedRequest, SeedRow,
    SeedingResult,
};
use crate::domain::{AuditStamp, ResourceKind};

use super::models::{
    CompanyChanges, DepartmentChanges, DraftChanges, EventLocationChanges, FacultyChanges,
    NewCompanyRow, NewDepartmentRow, NewEventLocationRow, NewFacultyRow, NewRecruitYearRow,
    NewSeedRunRow, NewUniversityRow, NewUserRow, RecruitYearChanges, UniversityChanges,
    UserChanges,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    companies, departments, event_locations, faculties, recruit_years, seed_runs, universities,
    users,
};

/// Diesel-backed implementation of the master-data seeding repository.
#[derive(Clone)]
pub struct DieselMasterDataSeedRepository {
    pool: DbPool,
}

impl DieselMasterDataSeedRepository {
    /// Create a new seeding repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use recruit_admin::outbound::persistence::{
    ///     DbPool, DieselMasterDataSeedRepository, PoolConfig,
    /// };
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost")).await?;
    /// let repository = DieselMasterDataSeedRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MasterDataSeedRepositoryError {
    MasterDataSeedRepositoryError::connection(error.message().to_owned())
}

fn map_diesel_error(error: diesel::result::Error) -> MasterDataSeedRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let error_message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                error = %error_message,
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error_message,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => MasterDataSeedRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            MasterDataSeedRepositoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            MasterDataSeedRepositoryError::query(info.message().to_owned())
        }
        _ => MasterDataSeedRepositoryError::query(error_message),
    }
}

/// Build insert rows for one table, failing on the first unconvertible draft.
fn rows<'a, D, C, N>(
    kind: ResourceKind,
    seeds: &'a [SeedRow<D>],
    stamp: &AuditStamp,
    build: impl Fn(uuid::Uuid, &AuditStamp, C) -> N,
) -> Result<Vec<N>, MasterDataSeedRepositoryError>
where
    C: DraftChanges<'a>,
    C::Resource: crate::domain::Resource<Draft = D>,
{
    seeds
        .iter()
        .map(|seed| {
            let changes = C::from_draft(&seed.draft, stamp).map_err(|err| {
                MasterDataSeedRepositoryError::query(format!("seeded {kind}: {err}"))
            })?;
            Ok(build(seed.id, stamp, changes))
        })
        .collect()
}

fn seed_row_count(request: &MasterDataSeedRequest) -> Result<i32, MasterDataSeedRepositoryError> {
    let total = request.departments.len()
        + request.universities.len()
        + request.faculties.len()
        + request.recruit_years.len()
        + request.event_locations.len()
        + request.companies.len();
    i32::try_from(total).map_err(|_| MasterDataSeedRepositoryError::query("seed is too large"))
}

#[async_trait]
impl MasterDataSeedRepository for DieselMasterDataSeedRepository {
    async fn seed(
        &self,
        request: &MasterDataSeedRequest,
    ) -> Result<SeedingResult, MasterDataSeedRepositoryError> {
        let stamp = &request.stamp;
        let run = NewSeedRunRow {
            seed_key: request.seed_key.as_str(),
            row_count: seed_row_count(request)?,
        };
        let department_rows = rows::<_, DepartmentChanges<'_>, _>(
            ResourceKind::Department,
            &request.departments,
            stamp,
            NewDepartmentRow::new,
        )?;
        let university_rows = rows::<_, UniversityChanges<'_>, _>(
            ResourceKind::University,
            &request.universities,
            stamp,
            NewUniversityRow::new,
        )?;
        let faculty_rows = rows::<_, FacultyChanges<'_>, _>(
            ResourceKind::Faculty,
            &request.faculties,
            stamp,
            NewFacultyRow::new,
        )?;
        let recruit_year_rows = rows::<_, RecruitYearChanges<'_>, _>(
            ResourceKind::RecruitYear,
            &request.recruit_years,
            stamp,
            NewRecruitYearRow::new,
        )?;
        let event_location_rows = rows::<_, EventLocationChanges<'_>, _>(
            ResourceKind::EventLocation,
            &request.event_locations,
            stamp,
            NewEventLocationRow::new,
        )?;
        let company_rows = rows::<_, CompanyChanges<'_>, _>(
            ResourceKind::Company,
            &request.companies,
            stamp,
            NewCompanyRow::new,
        )?;
        let administrator_row = request
            .administrator
            .as_ref()
            .map(|admin| {
                let changes = UserChanges::from_draft(&admin.draft, stamp).map_err(|err| {
                    MasterDataSeedRepositoryError::query(format!("seeded administrator: {err}"))
                })?;
                Ok::<_, MasterDataSeedRepositoryError>(
                    NewUserRow::new(admin.id, stamp, changes)
                        .with_password_hash(admin.password_hash.as_str()),
                )
            })
            .transpose()?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let rows_affected = diesel::insert_into(seed_runs::table)
                    .values(&run)
                    .on_conflict(seed_runs::seed_key)
                    .do_nothing()
                    .execute(conn)
                    .await?;

                if rows_affected == 0 {
                    return Ok(SeedingResult::AlreadySeeded);
                }

                // Parents before children so foreign keys resolve.
                if !department_rows.is_empty() {
                    diesel::insert_into(departments::table)
                        .values(&department_rows)
                        .execute(conn)
                        .await?;
                }
                if !university_rows.is_empty() {
                    diesel::insert_into(universities::table)
                        .values(&university_rows)
                        .execute(conn)
                        .await?;
                }
                if !faculty_rows.is_empty() {
                    diesel::insert_into(faculties::table)
                        .values(&faculty_rows)
                        .execute(conn)
                        .await?;
                }
                if !recruit_year_rows.is_empty() {
                    diesel::insert_into(recruit_years::table)
                        .values(&recruit_year_rows)
                        .execute(conn)
                        .await?;
                }
                if !event_location_rows.is_empty() {
                    diesel::insert_into(event_locations::table)
                        .values(&event_location_rows)
                        .execute(conn)
                        .await?;
                }
                if !company_rows.is_empty() {
                    diesel::insert_into(companies::table)
                        .values(&company_rows)
                        .execute(conn)
                        .await?;
                }
                if let Some(administrator) = &administrator_row {
                    diesel::insert_into(users::table)
                        .values(administrator)
                        .execute(conn)
                        .await?;
                }

                Ok(SeedingResult::Applied)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
