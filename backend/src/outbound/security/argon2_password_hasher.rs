//! Argon2id implementation of [`PasswordHasher`].
//!
//! Hashing is CPU and memory bound, so both operations run on tokio's
//! blocking pool and never stall an async worker.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id hasher producing PHC strings.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Build a hasher with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError::Hashing`] when the parameters fall
    /// outside what Argon2 accepts.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHasherError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

fn join_error(err: task::JoinError) -> PasswordHasherError {
    PasswordHasherError::hashing(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let argon2 = self.argon2.clone();
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| PasswordHash::new(hash.to_string()))
                .map_err(|err| PasswordHasherError::hashing(err.to_string()))
        })
        .await
        .map_err(join_error)?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let argon2 = self.argon2.clone();
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        task::spawn_blocking(move || {
            let parsed = PhcHash::new(&encoded)
                .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
            match argon2.verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(err) => Err(PasswordHasherError::hashing(err.to_string())),
            }
        })
        .await
        .map_err(join_error)?
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(1024, 1, 1).expect("valid params")
    }

    #[rstest]
    #[tokio::test]
    async fn hash_verifies_original_password(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("engines").await.expect("hashed");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("engines", &hash).await.expect("verified"));
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_is_a_mismatch(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("engines").await.expect("hashed");
        assert!(!hasher.verify("looms", &hash).await.expect("verified"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("engines").await.expect("hashed");
        let second = hasher.hash("engines").await.expect("hashed");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("engines", &PasswordHash::new("not a phc string"))
            .await
            .expect_err("malformed");
        assert!(matches!(err, PasswordHasherError::MalformedHash { .. }));
    }

    #[test]
    fn rejects_invalid_params() {
        assert!(Argon2PasswordHasher::with_params(1, 0, 0).is_err());
    }
}
