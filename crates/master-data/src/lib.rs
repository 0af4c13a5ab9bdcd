//! Master data registry for seeding reference tables.
//!
//! A registry is a versioned JSON document listing named seeds. Each seed
//! bundles the reference rows an administration backend needs before anyone
//! can log in: departments, universities with their faculties, recruit years,
//! event locations, companies and an optional initial administrator.
//!
//! The crate only parses and validates. It knows nothing about persistence
//! and does not depend on backend domain types.
//!
//! # Example
//!
//! ```
//! use master_data::SeedRegistry;
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{
//!         "name": "baseline",
//!         "universities": [{"name": "Kyoto University", "faculties": ["Law"]}],
//!         "recruitYears": [{"year": 2027, "name": "Class of 2027", "isActive": true}]
//!     }]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed = registry.find_seed("baseline").expect("seed exists");
//! assert_eq!(seed.row_count(), 3);
//! ```

mod error;
mod registry;
mod seed;

pub use error::RegistryError;
pub use registry::SeedRegistry;
pub use seed::{
    AdministratorSeed, CompanySeed, EventLocationSeed, RecruitYearSeed, SeedDefinition,
    UniversitySeed,
};
