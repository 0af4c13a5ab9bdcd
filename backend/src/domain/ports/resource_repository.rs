//! Driven port for storing any [`Resource`].
//!
//! Adapters translate storage failures into [`ResourceRepositoryError`]:
//! unique-constraint violations become `Conflict`, foreign keys that point at
//! missing rows become `MissingReference`, and deletes blocked by dependent
//! rows become `InUse`. Updating or deleting an absent id is not an error at
//! this level; the methods return `None`/`false` and the domain services
//! decide how to report it.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AuditStamp, ListQuery, Page, Resource};

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource repository adapters.
    pub enum ResourceRepositoryError {
        /// Repository connection could not be established.
        Connection { message } => "resource repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "resource repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { constraint } => "unique constraint violated: {constraint}",
        /// The write points at a row that does not exist.
        MissingReference { constraint } => "referenced row does not exist: {constraint}",
        /// The row cannot be deleted while other rows reference it.
        InUse { constraint } => "row is still referenced: {constraint}",
    }
}

/// Storage operations shared by every resource.
#[async_trait]
pub trait ResourceRepository<T: Resource>: Send + Sync {
    /// Page through rows matching `query`, ordered by sort key then id.
    async fn list(&self, query: &ListQuery) -> Result<Page<T>, ResourceRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, ResourceRepositoryError>;

    /// Insert a new row. `stamp` fills both halves of the audit trail.
    async fn insert(
        &self,
        id: Uuid,
        draft: &T::Draft,
        stamp: &AuditStamp,
    ) -> Result<T, ResourceRepositoryError>;

    /// Replace the editable fields of an existing row.
    async fn update(
        &self,
        id: Uuid,
        draft: &T::Draft,
        stamp: &AuditStamp,
    ) -> Result<Option<T>, ResourceRepositoryError>;

    /// Remove a row, returning whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool, ResourceRepositoryError>;
}
