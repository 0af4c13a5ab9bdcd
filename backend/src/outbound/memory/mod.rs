//! In-memory fixture adapters.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. Every driven port has an implementation here; all of them share
//! one [`MemoryStore`] so cross-resource constraints behave like the
//! relational schema.

mod repositories;
mod store;

pub use repositories::{
    InMemoryCredentialRepository, InMemoryMasterDataSeedRepository, InMemoryResourceRepository,
};
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
