//! Builders for [`HttpState`] over either adapter family.
//!
//! Both builders share one password hasher and clock between the account
//! services and the generic resource services so audit stamps agree.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::PasswordHasher;
use crate::domain::{AccountService, CredentialLoginService};
use crate::inbound::http::state::{HttpState, ResourcePorts};
use crate::outbound::memory::{
    InMemoryCredentialRepository, InMemoryResourceRepository, MemoryStore,
};
use crate::outbound::persistence::{
    DbPool, DieselCompanyRepository, DieselCredentialRepository, DieselDepartmentRepository,
    DieselDeviationValueRepository, DieselEducationalBackgroundRepository,
    DieselEventLocationRepository, DieselFacultyRepository, DieselInterviewerRepository,
    DieselRecruitYearRepository, DieselSearchConditionRepository, DieselStudentRepository,
    DieselTeacherRepository, DieselUniversityRepository, DieselUserRepository,
};

/// Wire every port to the process-local [`MemoryStore`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use recruit_admin::outbound::memory::MemoryStore;
/// use recruit_admin::outbound::password::Argon2PasswordHasher;
/// use recruit_admin::server::memory_http_state;
///
/// let state = memory_http_state(
///     MemoryStore::new(),
///     Arc::new(Argon2PasswordHasher::new()),
///     Arc::new(DefaultClock),
/// );
/// let _users = state.users.query.clone();
/// ```
pub fn memory_http_state<H>(store: MemoryStore, hasher: Arc<H>, clock: Arc<dyn Clock>) -> HttpState
where
    H: PasswordHasher + 'static,
{
    let credentials = Arc::new(InMemoryCredentialRepository::new(store.clone()));

    macro_rules! memory_ports {
        () => {
            ResourcePorts::from_repository(
                Arc::new(InMemoryResourceRepository::new(store.clone())),
                Arc::clone(&clock),
            )
        };
    }

    HttpState {
        login: Arc::new(CredentialLoginService::new(
            Arc::clone(&credentials),
            Arc::clone(&hasher),
        )),
        accounts: Arc::new(AccountService::new(
            credentials,
            hasher,
            Arc::clone(&clock),
        )),
        users: memory_ports!(),
        departments: memory_ports!(),
        event_locations: memory_ports!(),
        search_conditions: memory_ports!(),
        universities: memory_ports!(),
        faculties: memory_ports!(),
        deviation_values: memory_ports!(),
        recruit_years: memory_ports!(),
        companies: memory_ports!(),
        students: memory_ports!(),
        teachers: memory_ports!(),
        interviewers: memory_ports!(),
        educational_backgrounds: memory_ports!(),
    }
}

/// Wire every port to PostgreSQL through `pool`.
pub fn diesel_http_state<H>(pool: &DbPool, hasher: Arc<H>, clock: Arc<dyn Clock>) -> HttpState
where
    H: PasswordHasher + 'static,
{
    let credentials = Arc::new(DieselCredentialRepository::new(pool.clone()));

    macro_rules! diesel_ports {
        ($repository:ident) => {
            ResourcePorts::from_repository(
                Arc::new($repository::new(pool.clone())),
                Arc::clone(&clock),
            )
        };
    }

    HttpState {
        login: Arc::new(CredentialLoginService::new(
            Arc::clone(&credentials),
            Arc::clone(&hasher),
        )),
        accounts: Arc::new(AccountService::new(
            credentials,
            hasher,
            Arc::clone(&clock),
        )),
        users: diesel_ports!(DieselUserRepository),
        departments: diesel_ports!(DieselDepartmentRepository),
        event_locations: diesel_ports!(DieselEventLocationRepository),
        search_conditions: diesel_ports!(DieselSearchConditionRepository),
        universities: diesel_ports!(DieselUniversityRepository),
        faculties: diesel_ports!(DieselFacultyRepository),
        deviation_values: diesel_ports!(DieselDeviationValueRepository),
        recruit_years: diesel_ports!(DieselRecruitYearRepository),
        companies: diesel_ports!(DieselCompanyRepository),
        students: diesel_ports!(DieselStudentRepository),
        teachers: diesel_ports!(DieselTeacherRepository),
        interviewers: diesel_ports!(DieselInterviewerRepository),
        educational_backgrounds: diesel_ports!(DieselEducationalBackgroundRepository),
    }
}
