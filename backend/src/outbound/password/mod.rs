//! Argon2id password hashing adapter.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{Password, PasswordHash};

/// Hashes with Argon2id and stores PHC strings.
///
/// Verification reads the parameters embedded in the stored hash, so raising
/// the cost only affects newly written hashes.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Use the argon2 crate's recommended parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Use explicit cost parameters. Tests use the minimum for speed.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon2()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        Ok(PasswordHash::new(phc.to_string()))
    }

    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        let parsed =
            PhcHash::new(hash.as_str()).map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        match self.argon2().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNKNOWN_ACCOUNT_HASH;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
            .expect("minimum params are valid");
        Argon2PasswordHasher::with_params(params)
    }

    fn password(raw: &str) -> Password {
        Password::new("password", raw).expect("valid password")
    }

    #[rstest]
    fn hash_round_trips_and_rejects_wrong_password(hasher: Argon2PasswordHasher) {
        let stored = hasher.hash(&password("correct horse")).expect("hash");

        assert!(stored.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &stored).expect("verify"));
        assert!(!hasher.verify("battery staple", &stored).expect("verify"));
    }

    #[rstest]
    fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let first = hasher.hash(&password("same password")).expect("hash");
        let second = hasher.hash(&password("same password")).expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn unknown_account_hash_parses_and_never_matches(hasher: Argon2PasswordHasher) {
        let placeholder = PasswordHash::new(UNKNOWN_ACCOUNT_HASH);
        assert!(!hasher.verify("", &placeholder).expect("verify"));
        assert!(!hasher.verify("correct horse", &placeholder).expect("verify"));
    }

    #[rstest]
    fn malformed_hash_is_an_error(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("anything", &PasswordHash::new("not-a-phc-string"))
            .expect_err("malformed");
        assert!(matches!(err, PasswordHasherError::Hash { .. }));
    }
}
