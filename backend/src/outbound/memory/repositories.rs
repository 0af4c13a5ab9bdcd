//! Port implementations over [`MemoryStore`].

use std::marker::PhantomData;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    CredentialRepository, MasterDataSeedRepository, MasterDataSeedRepositoryError,
    MasterDataSeedRequest, ResourceRepository, ResourceRepositoryError, SeedRow, SeedingResult,
    StoredCredentials,
};
use crate::domain::{
    AuditStamp, ListQuery, Page, PasswordHash, Resource, User, UserDraft, UserId,
};

use super::store::{MemoryState, MemoryStore};

/// In-memory [`ResourceRepository`] for any resource.
pub struct InMemoryResourceRepository<T> {
    store: MemoryStore,
    _resource: PhantomData<fn() -> T>,
}

impl<T> InMemoryResourceRepository<T> {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }
}

impl<T> Clone for InMemoryResourceRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.store.clone())
    }
}

#[async_trait]
impl<T: Resource> ResourceRepository<T> for InMemoryResourceRepository<T> {
    async fn list(&self, query: &ListQuery) -> Result<Page<T>, ResourceRepositoryError> {
        Ok(self.store.read()?.list(query))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, ResourceRepositoryError> {
        Ok(self.store.read()?.get(id))
    }

    async fn insert(
        &self,
        id: Uuid,
        draft: &T::Draft,
        stamp: &AuditStamp,
    ) -> Result<T, ResourceRepositoryError> {
        self.store.write()?.insert::<T>(id, draft, stamp)
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &T::Draft,
        stamp: &AuditStamp,
    ) -> Result<Option<T>, ResourceRepositoryError> {
        self.store.write()?.update::<T>(id, draft, stamp)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ResourceRepositoryError> {
        self.store.write()?.delete(T::KIND, id)
    }
}

/// In-memory [`CredentialRepository`] sharing the user table.
#[derive(Clone)]
pub struct InMemoryCredentialRepository {
    store: MemoryStore,
}

impl InMemoryCredentialRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn credentials_for(state: &MemoryState, user: &User) -> StoredCredentials {
    let id = user.user_id();
    StoredCredentials {
        user_id: id,
        password_hash: state.password_hashes.get(id.as_uuid()).cloned(),
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, ResourceRepositoryError> {
        let state = self.store.read()?;
        let found = state
            .rows::<User>()
            .find(|user| user.email().eq_ignore_ascii_case(email))
            .map(|user| credentials_for(&state, user));
        Ok(found)
    }

    async fn find_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<StoredCredentials>, ResourceRepositoryError> {
        let state = self.store.read()?;
        Ok(state
            .get::<User>(*id.as_uuid())
            .map(|user| credentials_for(&state, &user)))
    }

    async fn create_with_password(
        &self,
        id: Uuid,
        draft: &UserDraft,
        password_hash: &PasswordHash,
        stamp: &AuditStamp,
    ) -> Result<User, ResourceRepositoryError> {
        let mut state = self.store.write()?;
        let user = state.insert::<User>(id, draft, stamp)?;
        state.password_hashes.insert(id, password_hash.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: &PasswordHash,
        stamp: &AuditStamp,
    ) -> Result<bool, ResourceRepositoryError> {
        let mut state = self.store.write()?;
        let Some(user) = state.get::<User>(*id.as_uuid()) else {
            return Ok(false);
        };
        let draft = UserDraft {
            email: user.email().to_owned(),
            name: user.name().to_owned(),
            department_id: user.department_id(),
        };
        state.replace(User::assemble(
            *id.as_uuid(),
            draft,
            user.audit().touched(*stamp),
        ));
        state
            .password_hashes
            .insert(*id.as_uuid(), password_hash.clone());
        Ok(true)
    }
}

/// In-memory [`MasterDataSeedRepository`].
///
/// Applies the seed to a copy of the state and publishes it only when every
/// row was accepted, mirroring a database transaction.
#[derive(Clone)]
pub struct InMemoryMasterDataSeedRepository {
    store: MemoryStore,
}

impl InMemoryMasterDataSeedRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn insert_rows<T: Resource>(
    state: &mut MemoryState,
    rows: &[SeedRow<T::Draft>],
    stamp: &AuditStamp,
) -> Result<(), ResourceRepositoryError> {
    for row in rows {
        state.insert::<T>(row.id, &row.draft, stamp)?;
    }
    Ok(())
}

fn apply_seed(
    state: &mut MemoryState,
    request: &MasterDataSeedRequest,
) -> Result<(), ResourceRepositoryError> {
    use crate::domain::entities::{
        Company, Department, EventLocation, Faculty, RecruitYear, University,
    };

    let stamp = &request.stamp;
    insert_rows::<Department>(state, &request.departments, stamp)?;
    insert_rows::<University>(state, &request.universities, stamp)?;
    insert_rows::<Faculty>(state, &request.faculties, stamp)?;
    insert_rows::<RecruitYear>(state, &request.recruit_years, stamp)?;
    insert_rows::<EventLocation>(state, &request.event_locations, stamp)?;
    insert_rows::<Company>(state, &request.companies, stamp)?;
    if let Some(admin) = &request.administrator {
        state.insert::<User>(admin.id, &admin.draft, stamp)?;
        state
            .password_hashes
            .insert(admin.id, admin.password_hash.clone());
    }
    state.seed_runs.insert(request.seed_key.clone());
    Ok(())
}

#[async_trait]
impl MasterDataSeedRepository for InMemoryMasterDataSeedRepository {
    async fn seed(
        &self,
        request: &MasterDataSeedRequest,
    ) -> Result<SeedingResult, MasterDataSeedRepositoryError> {
        let mut state = self
            .store
            .write()
            .map_err(|err| MasterDataSeedRepositoryError::query(err.to_string()))?;
        if state.seed_runs.contains(&request.seed_key) {
            return Ok(SeedingResult::AlreadySeeded);
        }

        let mut staged = state.clone();
        apply_seed(&mut staged, request)
            .map_err(|err| MasterDataSeedRepositoryError::query(err.to_string()))?;
        *state = staged;
        Ok(SeedingResult::Applied)
    }
}
