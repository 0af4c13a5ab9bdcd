//! Master-data seeding orchestration.
//!
//! Converts a named seed from the master-data registry into validated drafts
//! with deterministic ids, hashes the initial administrator password and
//! hands the lot to the seeding repository port.

use std::sync::Arc;

use master_data::{RegistryError, SeedDefinition, SeedRegistry};
use mockable::Clock;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{
    Company, CompanyDraft, Department, DepartmentDraft, EventLocation, EventLocationDraft,
    Faculty, FacultyDraft, RecruitYear, RecruitYearDraft, University, UniversityDraft,
};
use crate::domain::ports::{
    MasterDataSeedRepository, MasterDataSeedRepositoryError, MasterDataSeedRequest,
    PasswordHasher, PasswordHasherError, SeedAdministrator, SeedRow, SeedingResult,
};
use crate::domain::{AuditStamp, FieldError, Password, Resource, ResourceKind, User, UserDraft};

/// Result of attempting to apply master data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterDataSeedOutcome {
    /// Seed key used to record the run.
    pub seed_key: String,
    /// Number of reference rows in the seed, administrator excluded.
    pub row_count: usize,
    /// Persistence outcome for the seed run.
    pub result: SeedingResult,
}

/// Errors raised while preparing or applying master data.
#[derive(Debug, Error)]
pub enum MasterDataSeedingError {
    /// Seed registry lookups failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// A seeded value failed entity validation.
    #[error("seeded {kind} is invalid: {source}")]
    InvalidRow {
        kind: ResourceKind,
        #[source]
        source: FieldError,
    },
    /// The administrator password could not be hashed.
    #[error("administrator password could not be hashed: {0}")]
    Hashing(#[from] PasswordHasherError),
    /// Persistence adapter failed while seeding.
    #[error("master data persistence error: {0}")]
    Persistence(#[from] MasterDataSeedRepositoryError),
}

fn seed_namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, b"recruit-admin/master-data")
}

/// Stable id for a seeded row so the same seed always produces the same keys.
pub fn seeded_id(kind: ResourceKind, natural_key: &str) -> Uuid {
    let name = format!("{}:{}", kind.table(), natural_key.to_lowercase());
    Uuid::new_v5(&seed_namespace(), name.as_bytes())
}

fn validated<T: Resource>(draft: T::Draft) -> Result<T::Draft, MasterDataSeedingError> {
    T::validate(draft).map_err(|source| MasterDataSeedingError::InvalidRow {
        kind: T::KIND,
        source,
    })
}

/// Service that orchestrates master-data seeding.
#[derive(Clone)]
pub struct MasterDataSeeder<R, H> {
    repository: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<R, H> MasterDataSeeder<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            hasher,
            clock,
        }
    }
}

impl<R, H> MasterDataSeeder<R, H>
where
    R: MasterDataSeedRepository,
    H: PasswordHasher,
{
    /// Apply the named seed from `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`MasterDataSeedingError`] if the seed is unknown, a row fails
    /// validation, hashing fails or persistence fails.
    pub async fn seed_from_registry(
        &self,
        registry: &SeedRegistry,
        seed_name: &str,
    ) -> Result<MasterDataSeedOutcome, MasterDataSeedingError> {
        let seed = registry.find_seed(seed_name)?;
        let request = self.build_request(seed)?;
        let result = self.repository.seed(&request).await?;

        Ok(MasterDataSeedOutcome {
            seed_key: seed.name().to_owned(),
            row_count: seed.row_count(),
            result,
        })
    }

    fn build_request(
        &self,
        seed: &SeedDefinition,
    ) -> Result<MasterDataSeedRequest, MasterDataSeedingError> {
        let departments = seed
            .departments()
            .iter()
            .map(|name| {
                Ok(SeedRow {
                    id: seeded_id(ResourceKind::Department, name),
                    draft: validated::<Department>(DepartmentDraft { name: name.clone() })?,
                })
            })
            .collect::<Result<Vec<_>, MasterDataSeedingError>>()?;

        let mut universities = Vec::with_capacity(seed.universities().len());
        let mut faculties = Vec::new();
        for university in seed.universities() {
            let university_id = seeded_id(ResourceKind::University, university.name());
            universities.push(SeedRow {
                id: university_id,
                draft: validated::<University>(UniversityDraft {
                    name: university.name().to_owned(),
                })?,
            });
            for faculty in university.faculties() {
                faculties.push(SeedRow {
                    id: seeded_id(
                        ResourceKind::Faculty,
                        &format!("{}/{faculty}", university.name()),
                    ),
                    draft: validated::<Faculty>(FacultyDraft {
                        university_id,
                        name: faculty.clone(),
                    })?,
                });
            }
        }

        let recruit_years = seed
            .recruit_years()
            .iter()
            .map(|season| {
                Ok(SeedRow {
                    id: seeded_id(ResourceKind::RecruitYear, &season.year().to_string()),
                    draft: validated::<RecruitYear>(RecruitYearDraft {
                        year: season.year(),
                        name: season.name().to_owned(),
                        is_active: season.is_active(),
                    })?,
                })
            })
            .collect::<Result<Vec<_>, MasterDataSeedingError>>()?;

        let event_locations = seed
            .event_locations()
            .iter()
            .map(|venue| {
                Ok(SeedRow {
                    id: seeded_id(ResourceKind::EventLocation, venue.name()),
                    draft: validated::<EventLocation>(EventLocationDraft {
                        name: venue.name().to_owned(),
                        address: venue.address().map(str::to_owned),
                        capacity: venue.capacity(),
                    })?,
                })
            })
            .collect::<Result<Vec<_>, MasterDataSeedingError>>()?;

        let companies = seed
            .companies()
            .iter()
            .map(|company| {
                Ok(SeedRow {
                    id: seeded_id(ResourceKind::Company, company.name()),
                    draft: validated::<Company>(CompanyDraft {
                        name: company.name().to_owned(),
                        industry: company.industry().map(str::to_owned),
                    })?,
                })
            })
            .collect::<Result<Vec<_>, MasterDataSeedingError>>()?;

        let administrator = seed
            .administrator()
            .map(|admin| {
                let draft = validated::<User>(UserDraft {
                    email: admin.email().to_owned(),
                    name: admin.name().to_owned(),
                    department_id: None,
                })?;
                let password = Password::new("password", admin.password()).map_err(|source| {
                    MasterDataSeedingError::InvalidRow {
                        kind: ResourceKind::User,
                        source,
                    }
                })?;
                Ok::<_, MasterDataSeedingError>(SeedAdministrator {
                    id: seeded_id(ResourceKind::User, &draft.email),
                    password_hash: self.hasher.hash(&password)?,
                    draft,
                })
            })
            .transpose()?;

        Ok(MasterDataSeedRequest {
            seed_key: seed.name().to_owned(),
            stamp: AuditStamp::system(self.clock.utc()),
            departments,
            universities,
            faculties,
            recruit_years,
            event_locations,
            companies,
            administrator,
        })
    }
}
