//! Account registration, password changes and login.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    AccountCommand, CredentialRepository, LoginService, PasswordHasher, PasswordHasherError,
    StoredCredentials,
};
use crate::domain::resource_service::{map_repository_error, not_found};
use crate::domain::{
    AuditStamp, Error, LoginCredentials, Password, PasswordHash, Resource, ResourceKind,
    UNKNOWN_ACCOUNT_HASH, User, UserDraft, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Implements [`AccountCommand`] over a credential store and hasher.
#[derive(Clone)]
pub struct AccountService<C, H> {
    credentials: Arc<C>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<C, H> AccountService<C, H> {
    pub fn new(credentials: Arc<C>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            credentials,
            hasher,
            clock,
        }
    }
}

#[async_trait]
impl<C, H> AccountCommand for AccountService<C, H>
where
    C: CredentialRepository,
    H: PasswordHasher,
{
    async fn register(
        &self,
        actor: UserId,
        draft: UserDraft,
        password: Password,
    ) -> Result<User, Error> {
        let draft = User::validate(draft)?;
        let hash = self.hasher.hash(&password).map_err(map_hasher_error)?;
        let stamp = AuditStamp::new(Some(actor), self.clock.utc());
        let user = self
            .credentials
            .create_with_password(Uuid::new_v4(), &draft, &hash, &stamp)
            .await
            .map_err(|err| map_repository_error(ResourceKind::User, err))?;
        info!(user_id = %user.user_id(), created_by = %actor, "user registered");
        Ok(user)
    }

    async fn change_password(
        &self,
        actor: UserId,
        target: UserId,
        current_password: Option<String>,
        new_password: Password,
    ) -> Result<(), Error> {
        let stored = self
            .credentials
            .find_by_id(target)
            .await
            .map_err(|err| map_repository_error(ResourceKind::User, err))?
            .ok_or_else(|| not_found(ResourceKind::User, *target.as_uuid()))?;

        if actor == target {
            let Some(current) = current_password.filter(|value| !value.is_empty()) else {
                return Err(Error::invalid_request("currentPassword must not be empty")
                    .with_details(json!({ "field": "currentPassword", "code": "empty" })));
            };
            let matches = match stored.password_hash.as_ref() {
                Some(hash) => self
                    .hasher
                    .verify(&current, hash)
                    .map_err(map_hasher_error)?,
                None => false,
            };
            if !matches {
                return Err(Error::forbidden("current password is incorrect"));
            }
        }

        let hash = self.hasher.hash(&new_password).map_err(map_hasher_error)?;
        let stamp = AuditStamp::new(Some(actor), self.clock.utc());
        let updated = self
            .credentials
            .update_password(target, &hash, &stamp)
            .await
            .map_err(|err| map_repository_error(ResourceKind::User, err))?;
        if !updated {
            return Err(not_found(ResourceKind::User, *target.as_uuid()));
        }
        info!(user_id = %target, changed_by = %actor, "password changed");
        Ok(())
    }
}

/// Implements [`LoginService`] against stored password hashes.
///
/// Unknown emails, accounts without a password and wrong passwords all yield
/// the same `unauthorized` error.
#[derive(Clone)]
pub struct CredentialLoginService<C, H> {
    credentials: Arc<C>,
    hasher: Arc<H>,
}

impl<C, H> CredentialLoginService<C, H> {
    pub fn new(credentials: Arc<C>, hasher: Arc<H>) -> Self {
        Self {
            credentials,
            hasher,
        }
    }
}

#[async_trait]
impl<C, H> LoginService for CredentialLoginService<C, H>
where
    C: CredentialRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let stored = self
            .credentials
            .find_by_email(credentials.email())
            .await
            .map_err(|err| map_repository_error(ResourceKind::User, err))?;
        let (user_id, hash) = match stored {
            Some(StoredCredentials {
                user_id,
                password_hash: Some(hash),
            }) => (Some(user_id), hash),
            _ => (None, PasswordHash::new(UNKNOWN_ACCOUNT_HASH)),
        };
        let verified = self
            .hasher
            .verify(credentials.password(), &hash)
            .map_err(map_hasher_error)?;
        match user_id {
            Some(user_id) if verified => Ok(user_id),
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS)),
        }
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
