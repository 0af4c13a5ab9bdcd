//! Port abstraction for applying master-data seeds.
//!
//! Adapters must record the seed run and insert every row atomically: either
//! the whole seed lands or nothing does.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{
    CompanyDraft, DepartmentDraft, EventLocationDraft, FacultyDraft, RecruitYearDraft,
    UniversityDraft,
};
use crate::domain::{AuditStamp, PasswordHash, UserDraft};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by master-data seed repository adapters.
    pub enum MasterDataSeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message } => "master data seeding connection failed: {message}",
        /// Query or mutation failed during execution; the seed was rolled back.
        Query { message } => "master data seeding query failed: {message}",
    }
}

/// Result of attempting to apply a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// Seed was newly recorded and its rows inserted.
    Applied,
    /// Seed was already recorded; nothing changed.
    AlreadySeeded,
}

/// A row to insert with a caller-chosen id.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedRow<D> {
    pub id: Uuid,
    pub draft: D,
}

/// Initial administrator account created by a seed.
#[derive(Debug, Clone)]
pub struct SeedAdministrator {
    pub id: Uuid,
    pub draft: UserDraft,
    pub password_hash: PasswordHash,
}

/// Everything one seed run inserts.
#[derive(Debug, Clone)]
pub struct MasterDataSeedRequest {
    /// Seed name recorded in the seed run table.
    pub seed_key: String,
    /// Audit stamp applied to every inserted row.
    pub stamp: AuditStamp,
    pub departments: Vec<SeedRow<DepartmentDraft>>,
    pub universities: Vec<SeedRow<UniversityDraft>>,
    pub faculties: Vec<SeedRow<FacultyDraft>>,
    pub recruit_years: Vec<SeedRow<RecruitYearDraft>>,
    pub event_locations: Vec<SeedRow<EventLocationDraft>>,
    pub companies: Vec<SeedRow<CompanyDraft>>,
    pub administrator: Option<SeedAdministrator>,
}

/// Port for applying master-data seeds in a single transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MasterDataSeedRepository: Send + Sync {
    /// Returns `AlreadySeeded` without touching any rows when the seed key
    /// has been recorded before.
    async fn seed(
        &self,
        request: &MasterDataSeedRequest,
    ) -> Result<SeedingResult, MasterDataSeedRepositoryError>;
}
