//! Master-data registry types and JSON parsing.
//!
//! The registry holds named seed definitions. Parsing goes through private
//! `Raw*` serde structs and is followed by validation, so a
//! [`SeedRegistry`] value is always trimmed, non-blank and free of duplicate
//! names within each section.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::seed::{
    AdministratorSeed, CompanySeed, EventLocationSeed, RecruitYearSeed, SeedDefinition,
    UniversitySeed,
};

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;
const RECRUIT_YEAR_MIN: i32 = 2000;
const RECRUIT_YEAR_MAX: i32 = 2100;
const ADMIN_PASSWORD_MIN_LEN: usize = 8;

/// A registry of named master-data seeds.
///
/// # Example
///
/// ```
/// use master_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{"name": "baseline", "departments": ["Sales"]}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the JSON is malformed, the version is
    /// unsupported, the seeds array is empty, or any seed fails validation.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let mut names = HashSet::new();
        let mut seeds = Vec::with_capacity(raw.seeds.len());
        for (index, raw_seed) in raw.seeds.into_iter().enumerate() {
            let seed = validate_seed(index, raw_seed)?;
            if !names.insert(seed.name.clone()) {
                return Err(RegistryError::DuplicateSeed { name: seed.name });
            }
            seeds.push(seed);
        }

        Ok(Self {
            version: raw.version,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

fn required(section: &'static str, index: usize, value: &str) -> Result<String, RegistryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::BlankValue { section, index });
    }
    Ok(trimmed.to_owned())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Trim a list of names, rejecting blanks and case-insensitive duplicates.
fn unique_names(section: &'static str, values: &[String]) -> Result<Vec<String>, RegistryError> {
    let mut seen = HashSet::new();
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let name = required(section, index, value)?;
            if !seen.insert(name.to_lowercase()) {
                return Err(RegistryError::DuplicateEntry {
                    section,
                    value: name,
                });
            }
            Ok(name)
        })
        .collect()
}

fn validate_seed(index: usize, raw: RawSeedDefinition) -> Result<SeedDefinition, RegistryError> {
    let name = required("seeds", index, &raw.name)?;
    let departments = unique_names("departments", &raw.departments)?;

    let university_names: Vec<String> = raw
        .universities
        .iter()
        .map(|university| university.name.clone())
        .collect();
    unique_names("universities", &university_names)?;
    let universities = raw
        .universities
        .into_iter()
        .enumerate()
        .map(|(position, university)| {
            Ok(UniversitySeed {
                name: required("universities", position, &university.name)?,
                faculties: unique_names("faculties", &university.faculties)?,
            })
        })
        .collect::<Result<Vec<_>, RegistryError>>()?;

    let mut years = HashSet::new();
    let recruit_years = raw
        .recruit_years
        .into_iter()
        .enumerate()
        .map(|(position, recruit_year)| {
            if !(RECRUIT_YEAR_MIN..=RECRUIT_YEAR_MAX).contains(&recruit_year.year) {
                return Err(RegistryError::YearOutOfRange {
                    index: position,
                    year: recruit_year.year,
                    min: RECRUIT_YEAR_MIN,
                    max: RECRUIT_YEAR_MAX,
                });
            }
            if !years.insert(recruit_year.year) {
                return Err(RegistryError::DuplicateEntry {
                    section: "recruitYears",
                    value: recruit_year.year.to_string(),
                });
            }
            Ok(RecruitYearSeed {
                year: recruit_year.year,
                name: required("recruitYears", position, &recruit_year.name)?,
                is_active: recruit_year.is_active,
            })
        })
        .collect::<Result<Vec<_>, RegistryError>>()?;

    let location_names: Vec<String> = raw
        .event_locations
        .iter()
        .map(|location| location.name.clone())
        .collect();
    unique_names("eventLocations", &location_names)?;
    let event_locations = raw
        .event_locations
        .into_iter()
        .enumerate()
        .map(|(position, location)| {
            Ok(EventLocationSeed {
                name: required("eventLocations", position, &location.name)?,
                address: optional(location.address),
                capacity: location.capacity,
            })
        })
        .collect::<Result<Vec<_>, RegistryError>>()?;

    let company_names: Vec<String> = raw
        .companies
        .iter()
        .map(|company| company.name.clone())
        .collect();
    unique_names("companies", &company_names)?;
    let companies = raw
        .companies
        .into_iter()
        .enumerate()
        .map(|(position, company)| {
            Ok(CompanySeed {
                name: required("companies", position, &company.name)?,
                industry: optional(company.industry),
            })
        })
        .collect::<Result<Vec<_>, RegistryError>>()?;

    let administrator = raw.administrator.map(validate_administrator).transpose()?;

    Ok(SeedDefinition {
        name,
        departments,
        universities,
        recruit_years,
        event_locations,
        companies,
        administrator,
    })
}

fn validate_administrator(raw: RawAdministrator) -> Result<AdministratorSeed, RegistryError> {
    if raw.password.chars().count() < ADMIN_PASSWORD_MIN_LEN {
        return Err(RegistryError::WeakAdministratorPassword {
            min_len: ADMIN_PASSWORD_MIN_LEN,
        });
    }
    Ok(AdministratorSeed {
        email: required("administrator", 0, &raw.email)?.to_lowercase(),
        name: required("administrator", 0, &raw.name)?,
        password: raw.password,
    })
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSeedRegistry {
    version: u32,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSeedDefinition {
    name: String,
    #[serde(default)]
    departments: Vec<String>,
    #[serde(default)]
    universities: Vec<RawUniversity>,
    #[serde(default)]
    recruit_years: Vec<RawRecruitYear>,
    #[serde(default)]
    event_locations: Vec<RawEventLocation>,
    #[serde(default)]
    companies: Vec<RawCompany>,
    #[serde(default)]
    administrator: Option<RawAdministrator>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawUniversity {
    name: String,
    #[serde(default)]
    faculties: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawRecruitYear {
    year: i32,
    name: String,
    #[serde(default)]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawEventLocation {
    name: String,
    address: Option<String>,
    capacity: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawCompany {
    name: String,
    industry: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawAdministrator {
    email: String,
    name: String,
    password: String,
}

impl std::fmt::Debug for RawAdministrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawAdministrator")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;

    use super::*;

    const VALID_JSON: &str = r#"{
        "version": 1,
        "seeds": [
            {
                "name": "baseline",
                "departments": ["Human Resources", " Sales "],
                "universities": [
                    {"name": "Kyoto University", "faculties": ["Law", "Engineering"]}
                ],
                "recruitYears": [{"year": 2027, "name": "Class of 2027", "isActive": true}],
                "eventLocations": [
                    {"name": "Main Hall", "address": "1-1 Marunouchi", "capacity": 120}
                ],
                "companies": [{"name": "Acme", "industry": "  "}],
                "administrator": {
                    "email": "Admin@Example.com",
                    "name": "Administrator",
                    "password": "change-me-now"
                }
            },
            {"name": "empty"}
        ]
    }"#;

    #[test]
    fn parses_valid_registry() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");

        assert_eq!(registry.version(), 1);
        assert_eq!(registry.seeds().len(), 2);
    }

    #[test]
    fn trims_and_normalises_entries() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let seed = registry.find_seed("baseline").expect("seed found");

        assert_eq!(seed.departments(), ["Human Resources", "Sales"]);
        let company = seed.companies().first().expect("company");
        assert_eq!(company.industry(), None);
        let admin = seed.administrator().expect("administrator");
        assert_eq!(admin.email(), "admin@example.com");
        assert_eq!(seed.row_count(), 8);
    }

    #[test]
    fn sections_default_to_empty() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let seed = registry.find_seed("empty").expect("seed found");

        assert_eq!(seed.row_count(), 0);
        assert!(seed.administrator().is_none());
    }

    #[test]
    fn returns_error_for_unknown_seed() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let result = registry.find_seed("unknown");

        assert_eq!(
            result,
            Err(RegistryError::SeedNotFound {
                name: "unknown".to_owned()
            })
        );
    }

    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_version(r#"{"seeds": [{"name": "a"}]}"#)]
    #[case::unknown_field(r#"{"version": 1, "seeds": [{"name": "a", "colour": "red"}]}"#)]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = SeedRegistry::from_json(json);
        assert!(matches!(result, Err(RegistryError::ParseError { .. })));
    }

    #[rstest]
    #[case::unsupported_version(
        r#"{"version": 99, "seeds": [{"name": "a"}]}"#,
        RegistryError::UnsupportedVersion { expected: 1, actual: 99 }
    )]
    #[case::empty_seeds(r#"{"version": 1, "seeds": []}"#, RegistryError::EmptySeeds)]
    #[case::duplicate_seed(
        r#"{"version": 1, "seeds": [{"name": "a"}, {"name": " a "}]}"#,
        RegistryError::DuplicateSeed { name: "a".to_owned() }
    )]
    #[case::blank_department(
        r#"{"version": 1, "seeds": [{"name": "a", "departments": ["Sales", " "]}]}"#,
        RegistryError::BlankValue { section: "departments", index: 1 }
    )]
    #[case::duplicate_university(
        r#"{"version": 1, "seeds": [{"name": "a", "universities": [{"name": "Kyoto"}, {"name": "kyoto"}]}]}"#,
        RegistryError::DuplicateEntry { section: "universities", value: "kyoto".to_owned() }
    )]
    #[case::year_out_of_range(
        r#"{"version": 1, "seeds": [{"name": "a", "recruitYears": [{"year": 1999, "name": "old"}]}]}"#,
        RegistryError::YearOutOfRange { index: 0, year: 1999, min: 2000, max: 2100 }
    )]
    #[case::weak_password(
        r#"{"version": 1, "seeds": [{"name": "a", "administrator": {"email": "a@b.c", "name": "A", "password": "short"}}]}"#,
        RegistryError::WeakAdministratorPassword { min_len: 8 }
    )]
    fn rejects_invalid_registry(#[case] json: &str, #[case] expected: RegistryError) {
        let result = SeedRegistry::from_json(json);
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn loads_registry_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(VALID_JSON.as_bytes()).expect("write registry");

        let registry = SeedRegistry::from_file(file.path()).expect("registry loads");
        assert_eq!(registry.seeds().len(), 2);
    }

    #[test]
    fn missing_file_reports_io_error() {
        let result = SeedRegistry::from_file(Path::new("/nonexistent/seeds.json"));
        assert!(matches!(result, Err(RegistryError::IoError { .. })));
    }
}
