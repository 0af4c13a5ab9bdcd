//! Startup seeding orchestration.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use master_data::{RegistryError, SeedRegistry};
use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{MasterDataSeedRepository, PasswordHasher, SeedingResult};
use crate::domain::{MasterDataSeedOutcome, MasterDataSeeder, MasterDataSeedingError};
use crate::master_data::config::{MasterDataSettings, SeedingSkip};
use crate::outbound::memory::{InMemoryMasterDataSeedRepository, MemoryStore};
use crate::outbound::persistence::{DbPool, DieselMasterDataSeedRepository};
use crate::settings::AppEnvironment;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Registry parsing failed.
    #[error("registry parse error: {0}")]
    Registry(#[from] RegistryError),
    /// Seed validation or persistence failed.
    #[error("master data seeding error: {0}")]
    Seeding(#[from] MasterDataSeedingError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Where seeded rows are written.
#[derive(Clone, Copy)]
pub enum SeedTarget<'a> {
    Database(&'a DbPool),
    Memory(&'a MemoryStore),
}

/// Apply master data on startup when enabled.
///
/// Returns `Ok(None)` when seeding is disabled or the environment is
/// production.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::PathBuf;
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use recruit_admin::master_data::{MasterDataSettings, SeedTarget, seed_master_data_on_startup};
/// use recruit_admin::outbound::memory::MemoryStore;
/// use recruit_admin::outbound::password::Argon2PasswordHasher;
/// use recruit_admin::settings::AppEnvironment;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = MasterDataSettings {
///     enabled: true,
///     seed_name: Some("baseline".to_string()),
///     registry_path: Some(PathBuf::from("fixtures/master-data/seeds.json")),
/// };
/// let store = MemoryStore::new();
/// let outcome = seed_master_data_on_startup(
///     &settings,
///     AppEnvironment::Development,
///     SeedTarget::Memory(&store),
///     Arc::new(Argon2PasswordHasher::new()),
///     Arc::new(DefaultClock),
/// )
/// .await?;
/// assert!(outcome.is_some());
/// # Ok(())
/// # }
/// ```
pub async fn seed_master_data_on_startup<H>(
    settings: &MasterDataSettings,
    environment: AppEnvironment,
    target: SeedTarget<'_>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
) -> Result<Option<MasterDataSeedOutcome>, StartupSeedingError>
where
    H: PasswordHasher,
{
    if let Some(skip) = settings.skip_reason(environment) {
        match skip {
            SeedingSkip::Disabled => info!(reason = skip.as_str(), "master data seeding skipped"),
            SeedingSkip::Production => warn!(
                reason = skip.as_str(),
                "master data seeding enabled in production; skipping"
            ),
        }
        return Ok(None);
    }

    let seed_name = settings.seed_name();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry = load_registry(&settings.registry_path())?;
    let outcome = match target {
        SeedTarget::Database(pool) => {
            let repository = DieselMasterDataSeedRepository::new(pool.clone());
            apply(repository, hasher, clock, &registry, seed_name).await?
        }
        SeedTarget::Memory(store) => {
            let repository = InMemoryMasterDataSeedRepository::new(store.clone());
            apply(repository, hasher, clock, &registry, seed_name).await?
        }
    };

    match outcome.result {
        SeedingResult::Applied => info!(
            seed_key = %outcome.seed_key,
            row_count = outcome.row_count,
            "master data seeding applied"
        ),
        SeedingResult::AlreadySeeded => info!(
            seed_key = %outcome.seed_key,
            "master data seed already applied; skipping"
        ),
    }

    Ok(Some(outcome))
}

async fn apply<R, H>(
    repository: R,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
    registry: &SeedRegistry,
    seed_name: &str,
) -> Result<MasterDataSeedOutcome, MasterDataSeedingError>
where
    R: MasterDataSeedRepository,
    H: PasswordHasher,
{
    MasterDataSeeder::new(Arc::new(repository), hasher, clock)
        .seed_from_registry(registry, seed_name)
        .await
}

/// Read the registry through a capability on its parent directory.
fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let read_error = |source: io::Error| StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(file_name).map_err(read_error)?;
    Ok(SeedRegistry::from_json(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use mockable::DefaultClock;
    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    use crate::domain::ListQuery;
    use crate::domain::entities::Faculty;
    use crate::domain::ports::ResourceRepository;
    use crate::inbound::http::test_utils::fast_hasher;
    use crate::outbound::memory::InMemoryResourceRepository;

    const REGISTRY: &str = r#"{
        "version": 1,
        "seeds": [{
            "name": "demo",
            "departments": ["Sales"],
            "universities": [{"name": "Kyoto University", "faculties": ["Law", "Letters"]}],
            "administrator": {"email": "root@example.com", "name": "Root", "password": "long enough"}
        }]
    }"#;

    #[fixture]
    fn registry_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(REGISTRY.as_bytes()).expect("write registry");
        file
    }

    fn settings(file: &NamedTempFile, enabled: bool) -> MasterDataSettings {
        MasterDataSettings {
            enabled,
            seed_name: Some("demo".to_owned()),
            registry_path: Some(file.path().to_path_buf()),
        }
    }

    async fn seed(
        settings: &MasterDataSettings,
        environment: AppEnvironment,
        store: &MemoryStore,
    ) -> Result<Option<MasterDataSeedOutcome>, StartupSeedingError> {
        seed_master_data_on_startup(
            settings,
            environment,
            SeedTarget::Memory(store),
            fast_hasher(),
            Arc::new(DefaultClock),
        )
        .await
    }

    #[rstest]
    #[tokio::test]
    async fn disabled_seeding_is_skipped(registry_file: NamedTempFile) {
        let store = MemoryStore::new();
        let outcome = seed(&settings(&registry_file, false), AppEnvironment::Development, &store)
            .await
            .expect("skip succeeds");
        assert!(outcome.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn production_refuses_to_seed(registry_file: NamedTempFile) {
        let store = MemoryStore::new();
        let outcome = seed(&settings(&registry_file, true), AppEnvironment::Production, &store)
            .await
            .expect("skip succeeds");
        assert!(outcome.is_none());

        let faculties = InMemoryResourceRepository::<Faculty>::new(store)
            .list(&ListQuery::default())
            .await
            .expect("list faculties");
        assert_eq!(faculties.total, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_twice_reports_already_seeded(registry_file: NamedTempFile) {
        let store = MemoryStore::new();
        let settings = settings(&registry_file, true);

        let first = seed(&settings, AppEnvironment::Development, &store)
            .await
            .expect("first run")
            .expect("outcome");
        assert_eq!(first.result, SeedingResult::Applied);
        assert_eq!(first.seed_key, "demo");

        let second = seed(&settings, AppEnvironment::Development, &store)
            .await
            .expect("second run")
            .expect("outcome");
        assert_eq!(second.result, SeedingResult::AlreadySeeded);

        let faculties = InMemoryResourceRepository::<Faculty>::new(store)
            .list(&ListQuery::default())
            .await
            .expect("list faculties");
        assert_eq!(faculties.total, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_registry_reports_the_path() {
        let store = MemoryStore::new();
        let settings = MasterDataSettings {
            enabled: true,
            seed_name: None,
            registry_path: Some(PathBuf::from("/nonexistent/seeds.json")),
        };

        let err = seed(&settings, AppEnvironment::Test, &store)
            .await
            .expect_err("missing registry");
        assert!(
            matches!(&err, StartupSeedingError::RegistryRead { path, .. } if path.ends_with("seeds.json")),
            "unexpected error: {err}"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn blank_seed_name_is_rejected(registry_file: NamedTempFile) {
        let store = MemoryStore::new();
        let mut settings = settings(&registry_file, true);
        settings.seed_name = Some("  ".to_owned());

        let err = seed(&settings, AppEnvironment::Test, &store)
            .await
            .expect_err("blank seed name");
        assert!(matches!(err, StartupSeedingError::EmptySeedName));
    }
}
