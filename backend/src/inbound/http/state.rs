//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::entities::{
    Company, Department, DeviationValue, EducationalBackground, EventLocation, Faculty,
    Interviewer, RecruitYear, SearchCondition, Student, Teacher, University,
};
use crate::domain::ports::{
    AccountCommand, LoginService, ResourceCommand, ResourceQuery, ResourceRepository,
};
use crate::domain::{Resource, ResourceCommandService, ResourceQueryService, User};

/// Command and query ports for one resource.
pub struct ResourcePorts<T: Resource> {
    pub command: Arc<dyn ResourceCommand<T>>,
    pub query: Arc<dyn ResourceQuery<T>>,
}

impl<T: Resource> Clone for ResourcePorts<T> {
    fn clone(&self) -> Self {
        Self {
            command: Arc::clone(&self.command),
            query: Arc::clone(&self.query),
        }
    }
}

impl<T: Resource> ResourcePorts<T> {
    /// Wire the generic command and query services over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use recruit_admin::domain::entities::Department;
    /// use recruit_admin::inbound::http::state::ResourcePorts;
    /// use recruit_admin::outbound::memory::{InMemoryResourceRepository, MemoryStore};
    ///
    /// let repository = Arc::new(InMemoryResourceRepository::<Department>::new(MemoryStore::new()));
    /// let ports = ResourcePorts::from_repository(repository, Arc::new(DefaultClock));
    /// let _query = ports.query.clone();
    /// ```
    pub fn from_repository<R>(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self
    where
        R: ResourceRepository<T> + 'static,
    {
        Self {
            command: Arc::new(ResourceCommandService::new(Arc::clone(&repository), clock)),
            query: Arc::new(ResourceQueryService::new(repository)),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountCommand>,
    pub users: ResourcePorts<User>,
    pub departments: ResourcePorts<Department>,
    pub event_locations: ResourcePorts<EventLocation>,
    pub search_conditions: ResourcePorts<SearchCondition>,
    pub universities: ResourcePorts<University>,
    pub faculties: ResourcePorts<Faculty>,
    pub deviation_values: ResourcePorts<DeviationValue>,
    pub recruit_years: ResourcePorts<RecruitYear>,
    pub companies: ResourcePorts<Company>,
    pub students: ResourcePorts<Student>,
    pub teachers: ResourcePorts<Teacher>,
    pub interviewers: ResourcePorts<Interviewer>,
    pub educational_backgrounds: ResourcePorts<EducationalBackground>,
}
