//! Startup wiring for master-data seeding.

mod config;
mod startup;

pub use config::{MasterDataSettings, SeedingSkip};
pub use startup::{SeedTarget, StartupSeedingError, seed_master_data_on_startup};
