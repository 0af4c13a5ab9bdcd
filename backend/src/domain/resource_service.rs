//! Generic command and query services shared by every resource.
//!
//! Both services are thin: they validate drafts, stamp the audit trail and
//! translate repository outcomes into domain errors. Absent rows surface as
//! `not_found`; constraint failures as `conflict` or `invalid_request`.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    ResourceCommand, ResourceQuery, ResourceRepository, ResourceRepositoryError,
};
use crate::domain::{
    AuditStamp, Error, ListQuery, Page, Resource, ResourceKind, UserId,
};

pub(crate) fn map_repository_error(kind: ResourceKind, error: ResourceRepositoryError) -> Error {
    let label = kind.label();
    match error {
        ResourceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("{label} repository unavailable: {message}"))
        }
        ResourceRepositoryError::Query { message } => {
            Error::internal(format!("{label} repository error: {message}"))
        }
        ResourceRepositoryError::Conflict { constraint } => {
            Error::conflict(format!("{label} already exists"))
                .with_details(json!({ "code": "duplicate", "constraint": constraint }))
        }
        ResourceRepositoryError::MissingReference { constraint } => {
            Error::invalid_request(format!("{label} refers to a record that does not exist"))
                .with_details(json!({ "code": "missing_reference", "constraint": constraint }))
        }
        ResourceRepositoryError::InUse { constraint } => {
            Error::conflict(format!("{label} is still referenced by other records"))
                .with_details(json!({ "code": "in_use", "constraint": constraint }))
        }
    }
}

pub(crate) fn not_found(kind: ResourceKind, id: Uuid) -> Error {
    Error::not_found(format!("{} {id} not found", kind.label()))
}

/// Write-side service for resource `T`.
pub struct ResourceCommandService<T, R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    _resource: PhantomData<fn() -> T>,
}

impl<T, R> ResourceCommandService<T, R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            _resource: PhantomData,
        }
    }

    fn stamp(&self, actor: UserId) -> AuditStamp {
        AuditStamp::new(Some(actor), self.clock.utc())
    }
}

impl<T, R> Clone for ResourceCommandService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<T, R> ResourceCommand<T> for ResourceCommandService<T, R>
where
    T: Resource,
    R: ResourceRepository<T>,
{
    async fn create(&self, actor: UserId, draft: T::Draft) -> Result<T, Error> {
        let draft = T::validate(draft)?;
        let stamp = self.stamp(actor);
        self.repository
            .insert(Uuid::new_v4(), &draft, &stamp)
            .await
            .map_err(|err| map_repository_error(T::KIND, err))
    }

    async fn update(&self, actor: UserId, id: Uuid, draft: T::Draft) -> Result<T, Error> {
        let draft = T::validate(draft)?;
        let stamp = self.stamp(actor);
        self.repository
            .update(id, &draft, &stamp)
            .await
            .map_err(|err| map_repository_error(T::KIND, err))?
            .ok_or_else(|| not_found(T::KIND, id))
    }

    async fn delete(&self, _actor: UserId, id: Uuid) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(|err| map_repository_error(T::KIND, err))?;
        if removed {
            Ok(())
        } else {
            Err(not_found(T::KIND, id))
        }
    }
}

/// Read-side service for resource `T`.
pub struct ResourceQueryService<T, R> {
    repository: Arc<R>,
    _resource: PhantomData<fn() -> T>,
}

impl<T, R> ResourceQueryService<T, R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            _resource: PhantomData,
        }
    }
}

impl<T, R> Clone for ResourceQueryService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<T, R> ResourceQuery<T> for ResourceQueryService<T, R>
where
    T: Resource,
    R: ResourceRepository<T>,
{
    async fn list(&self, query: ListQuery) -> Result<Page<T>, Error> {
        self.repository
            .list(&query)
            .await
            .map_err(|err| map_repository_error(T::KIND, err))
    }

    async fn get(&self, id: Uuid) -> Result<T, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error(T::KIND, err))?
            .ok_or_else(|| not_found(T::KIND, id))
    }
}

#[cfg(test)]
#[path = "resource_service_tests.rs"]
mod tests;
