//! Settings for seeding master data at startup.
//!
//! Read from `MASTER_DATA_*` variables through OrthoConfig. Seeding stays off
//! unless enabled and never runs against a production environment.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::settings::AppEnvironment;

const DEFAULT_SEED_NAME: &str = "baseline";
const BUNDLED_REGISTRY: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/fixtures/master-data/seeds.json"
);

/// Why startup seeding does not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingSkip {
    Disabled,
    Production,
}

impl SeedingSkip {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MASTER_DATA")]
pub struct MasterDataSettings {
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Registry entry to apply; `baseline` when unset.
    pub seed_name: Option<String>,
    /// Registry file; the crate's bundled registry when unset.
    pub registry_path: Option<PathBuf>,
}

impl MasterDataSettings {
    /// Reason to skip seeding in `environment`, if any. A disabled flag is
    /// reported ahead of the production refusal.
    pub fn skip_reason(&self, environment: AppEnvironment) -> Option<SeedingSkip> {
        if !self.enabled {
            Some(SeedingSkip::Disabled)
        } else if environment == AppEnvironment::Production {
            Some(SeedingSkip::Production)
        } else {
            None
        }
    }

    /// Seed name without surrounding whitespace. Empty when configured blank.
    pub fn seed_name(&self) -> &str {
        self.seed_name
            .as_deref()
            .map_or(DEFAULT_SEED_NAME, str::trim)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(BUNDLED_REGISTRY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use master_data::SeedRegistry;
    use rstest::rstest;

    fn load_with(
        enabled: Option<&str>,
        seed_name: Option<&str>,
        registry_path: Option<&str>,
    ) -> MasterDataSettings {
        let _guard = lock_env([
            ("MASTER_DATA_ENABLED", enabled.map(str::to_owned)),
            ("MASTER_DATA_SEED_NAME", seed_name.map(str::to_owned)),
            ("MASTER_DATA_REGISTRY_PATH", registry_path.map(str::to_owned)),
        ]);
        MasterDataSettings::load_from_iter([OsString::from("recruit-admin")])
            .expect("master data settings load")
    }

    #[rstest]
    #[case::unset(None, AppEnvironment::Development, Some(SeedingSkip::Disabled))]
    #[case::off_in_production(Some("false"), AppEnvironment::Production, Some(SeedingSkip::Disabled))]
    #[case::on_in_production(Some("true"), AppEnvironment::Production, Some(SeedingSkip::Production))]
    #[case::on_in_test(Some("true"), AppEnvironment::Test, None)]
    #[case::on_in_development(Some("true"), AppEnvironment::Development, None)]
    fn flag_and_environment_decide_seeding(
        #[case] enabled: Option<&str>,
        #[case] environment: AppEnvironment,
        #[case] expected: Option<SeedingSkip>,
    ) {
        let settings = load_with(enabled, None, None);
        assert_eq!(settings.skip_reason(environment), expected);
    }

    #[rstest]
    #[case(None, "baseline")]
    #[case(Some("  reference-only \t"), "reference-only")]
    #[case(Some("   "), "")]
    fn seed_name_is_trimmed(#[case] raw: Option<&str>, #[case] expected: &str) {
        assert_eq!(load_with(Some("true"), raw, None).seed_name(), expected);
    }

    #[rstest]
    fn registry_override_replaces_the_bundled_file() {
        let settings = load_with(None, None, Some("/srv/recruit/seeds.json"));
        assert_eq!(
            settings.registry_path(),
            PathBuf::from("/srv/recruit/seeds.json")
        );
    }

    #[rstest]
    fn bundled_registry_holds_the_default_seed_with_an_administrator() {
        let settings = load_with(Some("true"), None, None);
        let registry =
            SeedRegistry::from_file(&settings.registry_path()).expect("bundled registry parses");
        let seed = registry
            .find_seed(settings.seed_name())
            .expect("default seed exists");
        assert!(seed.administrator().is_some());
    }
}
