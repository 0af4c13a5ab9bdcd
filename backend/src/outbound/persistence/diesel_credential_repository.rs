//! PostgreSQL-backed credential storage on the `users` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CredentialRepository, ResourceRepositoryError, StoredCredentials};
use crate::domain::{AuditStamp, PasswordHash, User, UserDraft, UserId};

use super::diesel_helpers::{Operation, map_diesel_error, map_pool_error};
use super::models::{DraftChanges, NewUserRow, PasswordChange, ResourceRow, UserChanges, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of [`CredentialRepository`].
#[derive(Clone)]
pub struct DieselCredentialRepository {
    pool: DbPool,
}

impl DieselCredentialRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_where(
        &self,
        filter: users::BoxedQuery<'static, diesel::pg::Pg>,
    ) -> Result<Option<StoredCredentials>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Option<(Uuid, Option<String>)> = filter
            .select((users::id, users::password_hash))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, Operation::Read))?;

        Ok(found.map(|(id, hash)| StoredCredentials {
            user_id: UserId::from_uuid(id),
            password_hash: hash.map(PasswordHash::new),
        }))
    }
}

#[async_trait]
impl CredentialRepository for DieselCredentialRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, ResourceRepositoryError> {
        // Emails are stored lowercased.
        self.find_where(
            users::table
                .filter(users::email.eq(email.to_lowercase()))
                .into_boxed(),
        )
        .await
    }

    async fn find_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<StoredCredentials>, ResourceRepositoryError> {
        self.find_where(users::table.find(*id.as_uuid()).into_boxed())
            .await
    }

    async fn create_with_password(
        &self,
        id: Uuid,
        draft: &UserDraft,
        password_hash: &PasswordHash,
        stamp: &AuditStamp,
    ) -> Result<User, ResourceRepositoryError> {
        let changes = UserChanges::from_draft(draft, stamp)?;
        let new_row = NewUserRow::new(id, stamp, changes).with_password_hash(password_hash.as_str());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Operation::Write))?;
        row.into_resource()
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: &PasswordHash,
        stamp: &AuditStamp,
    ) -> Result<bool, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(*id.as_uuid()))
            .set(PasswordChange::new(password_hash.as_str(), stamp))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Operation::Write))?;
        Ok(updated > 0)
    }
}
