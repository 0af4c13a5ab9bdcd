//! Environment parsing helpers for session configuration.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean `SESSION_*` variable and the value debug builds fall back to.
pub(super) struct Toggle {
    name: &'static str,
    default_value: bool,
}

impl Toggle {
    pub(super) const fn new(name: &'static str, default_value: bool) -> Self {
        Self {
            name,
            default_value,
        }
    }

    const fn default_label(&self) -> &'static str {
        if self.default_value {
            "enabled"
        } else {
            "disabled"
        }
    }
}

/// Read a boolean toggle. Release builds reject missing or malformed values.
pub(super) fn read_toggle<E: Env>(
    env: &E,
    mode: BuildMode,
    toggle: Toggle,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(toggle.name) else {
        return fallback_or_error(
            mode,
            toggle.default_value,
            SessionConfigError::MissingEnv { name: toggle.name },
            || {
                warn!(
                    variable = toggle.name,
                    "not set; defaulting to {}",
                    toggle.default_label()
                );
            },
        );
    };

    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => fallback_or_error(
            mode,
            toggle.default_value,
            SessionConfigError::InvalidEnv {
                name: toggle.name,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            },
            || {
                warn!(
                    variable = toggle.name,
                    value = %value,
                    "invalid toggle; defaulting to {}",
                    toggle.default_label()
                );
            },
        ),
    }
}

/// Debug builds warn and use `fallback`; release builds return `error`.
pub(super) fn fallback_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: F,
) -> Result<T, SessionConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

pub(super) fn parse_same_site(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    default_same_site: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => fallback_or_error(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it"),
        ),
        _ => fallback_or_error(
            mode,
            default_same_site,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            },
            || warn!(value = %value, "invalid SESSION_SAMESITE, using default"),
        ),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
