//! Driving port for account management.

use async_trait::async_trait;

use crate::domain::{Error, Password, User, UserDraft, UserId};

/// Account use-cases that involve password material.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create a user that can sign in with `password`.
    async fn register(
        &self,
        actor: UserId,
        draft: UserDraft,
        password: Password,
    ) -> Result<User, Error>;

    /// Change `target`'s password.
    ///
    /// `current_password` is required when `actor` changes their own password
    /// and ignored when resetting someone else's.
    async fn change_password(
        &self,
        actor: UserId,
        target: UserId,
        current_password: Option<String>,
        new_password: Password,
    ) -> Result<(), Error>;
}
