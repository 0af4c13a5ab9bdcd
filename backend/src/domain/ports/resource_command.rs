//! Driving ports for resource writes and reads.
//!
//! Commands and queries are split so handlers depend only on the side they
//! need and tests can substitute either independently.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, ListQuery, Page, Resource, UserId};

/// Write use-cases for a resource. `actor` is the signed-in user recorded in
/// the audit trail.
#[async_trait]
pub trait ResourceCommand<T: Resource>: Send + Sync {
    async fn create(&self, actor: UserId, draft: T::Draft) -> Result<T, Error>;

    async fn update(&self, actor: UserId, id: Uuid, draft: T::Draft) -> Result<T, Error>;

    async fn delete(&self, actor: UserId, id: Uuid) -> Result<(), Error>;
}

/// Read use-cases for a resource.
#[async_trait]
pub trait ResourceQuery<T: Resource>: Send + Sync {
    async fn list(&self, query: ListQuery) -> Result<Page<T>, Error>;

    async fn get(&self, id: Uuid) -> Result<T, Error>;
}
