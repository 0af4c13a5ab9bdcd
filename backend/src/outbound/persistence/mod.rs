//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel models and
//!   domain types. Validation happens before they are called.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Constraint-driven errors**: unique and foreign-key violations are
//!   reported by constraint name so the domain can answer 409 or 400.
//!
//! # Example
//!
//! ```ignore
//! use recruit_admin::outbound::persistence::{DbPool, DieselDepartmentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recruit")).await?;
//! let departments = DieselDepartmentRepository::new(pool);
//! ```

mod diesel_credential_repository;
mod diesel_helpers;
mod diesel_master_data_seed_repository;
mod diesel_resource_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_credential_repository::DieselCredentialRepository;
pub use diesel_master_data_seed_repository::DieselMasterDataSeedRepository;
pub use diesel_resource_repository::{
    DieselCompanyRepository, DieselDepartmentRepository, DieselDeviationValueRepository,
    DieselEducationalBackgroundRepository, DieselEventLocationRepository, DieselFacultyRepository,
    DieselInterviewerRepository, DieselRecruitYearRepository, DieselSearchConditionRepository,
    DieselStudentRepository, DieselTeacherRepository, DieselUniversityRepository,
    DieselUserRepository,
};
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
