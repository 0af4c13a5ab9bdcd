//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod credential_repository;
mod login_service;
mod master_data_seed_repository;
mod password_hasher;
mod resource_command;
mod resource_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
pub use credential_repository::{CredentialRepository, StoredCredentials};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use master_data_seed_repository::MockMasterDataSeedRepository;
pub use master_data_seed_repository::{
    MasterDataSeedRepository, MasterDataSeedRepositoryError, MasterDataSeedRequest,
    SeedAdministrator, SeedRow, SeedingResult,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
pub use resource_command::{ResourceCommand, ResourceQuery};
pub use resource_repository::{ResourceRepository, ResourceRepositoryError};
