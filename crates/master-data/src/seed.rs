//! Entry types describing one named master-data seed.

use std::fmt;

/// A named bundle of reference rows applied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    pub(crate) name: String,
    pub(crate) departments: Vec<String>,
    pub(crate) universities: Vec<UniversitySeed>,
    pub(crate) recruit_years: Vec<RecruitYearSeed>,
    pub(crate) event_locations: Vec<EventLocationSeed>,
    pub(crate) companies: Vec<CompanySeed>,
    pub(crate) administrator: Option<AdministratorSeed>,
}

impl SeedDefinition {
    /// Returns the seed name used as the idempotency key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Department names.
    #[must_use]
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// Universities with their faculties.
    #[must_use]
    pub fn universities(&self) -> &[UniversitySeed] {
        &self.universities
    }

    /// Recruit years.
    #[must_use]
    pub fn recruit_years(&self) -> &[RecruitYearSeed] {
        &self.recruit_years
    }

    /// Event locations.
    #[must_use]
    pub fn event_locations(&self) -> &[EventLocationSeed] {
        &self.event_locations
    }

    /// Companies.
    #[must_use]
    pub fn companies(&self) -> &[CompanySeed] {
        &self.companies
    }

    /// Initial administrator account, if the seed defines one.
    #[must_use]
    pub const fn administrator(&self) -> Option<&AdministratorSeed> {
        self.administrator.as_ref()
    }

    /// Total number of reference rows (excluding the administrator).
    #[must_use]
    pub fn row_count(&self) -> usize {
        let faculties: usize = self
            .universities
            .iter()
            .map(|university| university.faculties.len())
            .sum();
        self.departments.len()
            + self.universities.len()
            + faculties
            + self.recruit_years.len()
            + self.event_locations.len()
            + self.companies.len()
    }
}

/// A university and the faculties seeded beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversitySeed {
    pub(crate) name: String,
    pub(crate) faculties: Vec<String>,
}

impl UniversitySeed {
    /// University name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Faculty names belonging to this university.
    #[must_use]
    pub fn faculties(&self) -> &[String] {
        &self.faculties
    }
}

/// A recruiting season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecruitYearSeed {
    pub(crate) year: i32,
    pub(crate) name: String,
    pub(crate) is_active: bool,
}

impl RecruitYearSeed {
    /// Graduation year targeted by the season.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the season is currently open.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

/// A venue used for recruiting events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLocationSeed {
    pub(crate) name: String,
    pub(crate) address: Option<String>,
    pub(crate) capacity: Option<u32>,
}

impl EventLocationSeed {
    /// Venue name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Postal address.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Seating capacity.
    #[must_use]
    pub const fn capacity(&self) -> Option<u32> {
        self.capacity
    }
}

/// A company row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySeed {
    pub(crate) name: String,
    pub(crate) industry: Option<String>,
}

impl CompanySeed {
    /// Company name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Industry classification.
    #[must_use]
    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }
}

/// Initial administrator credentials.
///
/// The password is plain text in the registry and must be hashed before it is
/// stored. `Debug` output redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct AdministratorSeed {
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) password: String,
}

impl AdministratorSeed {
    /// Login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plain-text initial password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for AdministratorSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdministratorSeed")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}
