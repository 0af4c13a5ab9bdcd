//! Shared state behind the in-memory adapters.
//!
//! All resources live in one [`MemoryStore`] so foreign-key style checks can
//! see every table: writes verify that referenced rows exist, deletes refuse
//! to orphan restricting rows and remove cascading ones. Deleting a user
//! clears that user from every audit trail.

use std::any::Any;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::domain::ports::ResourceRepositoryError;
use crate::domain::{
    AuditStamp, AuditTrail, ListQuery, Page, PasswordHash, Reference, Resource, ResourceKind,
    UserId,
};

type StoredValue = Arc<dyn Any + Send + Sync>;

#[derive(Clone)]
struct StoredRow {
    value: StoredValue,
    unique_key: Option<String>,
    references: Vec<Reference>,
    forget_actor: fn(&StoredValue, UserId) -> Option<StoredValue>,
}

/// Copy of the stored entity without `user` in its audit trail, if it
/// mentioned them.
fn forget_actor<T: Resource>(value: &StoredValue, user: UserId) -> Option<StoredValue> {
    let mut entity = value.downcast_ref::<T>()?.clone();
    if !entity.audit_mut().forget_actor(user) {
        return None;
    }
    Some(Arc::new(entity))
}

#[derive(Clone, Default)]
pub(super) struct MemoryState {
    tables: HashMap<ResourceKind, BTreeMap<Uuid, StoredRow>>,
    pub(super) password_hashes: HashMap<Uuid, PasswordHash>,
    pub(super) seed_runs: HashSet<String>,
}

fn fkey(owner: ResourceKind, target: ResourceKind) -> String {
    format!("{}_{}_fkey", owner.table(), target.table())
}

impl MemoryState {
    pub(super) fn get<T: Resource>(&self, id: Uuid) -> Option<T> {
        self.tables
            .get(&T::KIND)?
            .get(&id)?
            .value
            .downcast_ref::<T>()
            .cloned()
    }

    pub(super) fn rows<T: Resource>(&self) -> impl Iterator<Item = &T> {
        self.tables
            .get(&T::KIND)
            .into_iter()
            .flat_map(BTreeMap::values)
            .filter_map(|row| row.value.downcast_ref::<T>())
    }

    fn contains(&self, kind: ResourceKind, id: Uuid) -> bool {
        self.tables
            .get(&kind)
            .is_some_and(|table| table.contains_key(&id))
    }

    pub(super) fn list<T: Resource>(&self, query: &ListQuery) -> Page<T> {
        let mut matching: Vec<&T> = self
            .rows::<T>()
            .filter(|row| {
                query
                    .parent_id()
                    .is_none_or(|parent| row.parent_id() == Some(parent))
            })
            .filter(|row| query.matches_keyword(&row.label()))
            .collect();
        matching.sort_by_cached_key(|row| (row.sort_key(), row.id()));

        let total = matching.len() as u64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(query.per_page() as usize)
            .cloned()
            .collect();
        Page::new(items, total, query)
    }

    fn check_write<T: Resource>(&self, entity: &T) -> Result<(), ResourceRepositoryError> {
        if let Some(key) = entity.unique_key() {
            let clash = self.tables.get(&T::KIND).is_some_and(|table| {
                table
                    .iter()
                    .any(|(id, row)| *id != entity.id() && row.unique_key.as_ref() == Some(&key))
            });
            if clash {
                return Err(ResourceRepositoryError::conflict(format!(
                    "{}_unique",
                    T::KIND.table()
                )));
            }
        }
        for reference in entity.references() {
            if !self.contains(reference.target(), reference.id()) {
                return Err(ResourceRepositoryError::missing_reference(fkey(
                    T::KIND,
                    reference.target(),
                )));
            }
        }
        Ok(())
    }

    fn put<T: Resource>(&mut self, entity: T) {
        let row = StoredRow {
            unique_key: entity.unique_key(),
            references: entity.references(),
            forget_actor: forget_actor::<T>,
            value: Arc::new(entity.clone()),
        };
        self.tables
            .entry(T::KIND)
            .or_default()
            .insert(entity.id(), row);
    }

    pub(super) fn insert<T: Resource>(
        &mut self,
        id: Uuid,
        draft: &T::Draft,
        stamp: &AuditStamp,
    ) -> Result<T, ResourceRepositoryError> {
        if self.contains(T::KIND, id) {
            return Err(ResourceRepositoryError::conflict(format!(
                "{}_pkey",
                T::KIND.table()
            )));
        }
        let entity = T::assemble(id, draft.clone(), AuditTrail::created(*stamp));
        self.check_write(&entity)?;
        self.put(entity.clone());
        Ok(entity)
    }

    pub(super) fn update<T: Resource>(
        &mut self,
        id: Uuid,
        draft: &T::Draft,
        stamp: &AuditStamp,
    ) -> Result<Option<T>, ResourceRepositoryError> {
        let Some(existing) = self.get::<T>(id) else {
            return Ok(None);
        };
        let entity = T::assemble(id, draft.clone(), existing.audit().touched(*stamp));
        self.check_write(&entity)?;
        self.put(entity.clone());
        Ok(Some(entity))
    }

    /// Replace a stored entity without constraint checks; callers keep the
    /// unique key and references unchanged.
    pub(super) fn replace<T: Resource>(&mut self, entity: T) {
        self.put(entity);
    }

    pub(super) fn delete(
        &mut self,
        kind: ResourceKind,
        id: Uuid,
    ) -> Result<bool, ResourceRepositoryError> {
        if !self.contains(kind, id) {
            return Ok(false);
        }

        let mut cascaded = Vec::new();
        for (owner, table) in &self.tables {
            for (row_id, row) in table {
                let Some(link) = row
                    .references
                    .iter()
                    .find(|link| link.target() == kind && link.id() == id)
                else {
                    continue;
                };
                if !link.is_cascade() {
                    return Err(ResourceRepositoryError::in_use(fkey(*owner, kind)));
                }
                cascaded.push((*owner, *row_id));
            }
        }

        for (owner, row_id) in cascaded {
            self.delete(owner, row_id)?;
        }
        if let Some(table) = self.tables.get_mut(&kind) {
            table.remove(&id);
        }
        if kind == ResourceKind::User {
            self.password_hashes.remove(&id);
            self.clear_actor(UserId::from_uuid(id));
        }
        Ok(true)
    }

    fn clear_actor(&mut self, user: UserId) {
        for row in self.tables.values_mut().flat_map(BTreeMap::values_mut) {
            if let Some(value) = (row.forget_actor)(&row.value, user) {
                row.value = value;
            }
        }
    }
}

/// Process-local storage shared by every in-memory adapter.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>, ResourceRepositoryError> {
        self.state
            .read()
            .map_err(|_| ResourceRepositoryError::query("memory store lock poisoned"))
    }

    pub(super) fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, MemoryState>, ResourceRepositoryError> {
        self.state
            .write()
            .map_err(|_| ResourceRepositoryError::query("memory store lock poisoned"))
    }
}
