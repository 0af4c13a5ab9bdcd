//! Driven port for user credentials.
//!
//! Kept apart from [`super::ResourceRepository`] so password hashes never
//! travel through the generic resource paths.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AuditStamp, PasswordHash, User, UserDraft, UserId};

use super::ResourceRepositoryError;

/// Credential material stored for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user_id: UserId,
    /// `None` for accounts that cannot sign in with a password.
    pub password_hash: Option<PasswordHash>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Look up credentials by lowercased email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, ResourceRepositoryError>;

    async fn find_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<StoredCredentials>, ResourceRepositoryError>;

    /// Insert a user row together with its password hash.
    async fn create_with_password(
        &self,
        id: Uuid,
        draft: &UserDraft,
        password_hash: &PasswordHash,
        stamp: &AuditStamp,
    ) -> Result<User, ResourceRepositoryError>;

    /// Replace a user's password hash, returning whether the user exists.
    async fn update_password(
        &self,
        id: UserId,
        password_hash: &PasswordHash,
        stamp: &AuditStamp,
    ) -> Result<bool, ResourceRepositoryError>;
}
