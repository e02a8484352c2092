use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Argon2id work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HashingParams {
  /// Memory cost in KiB
  #[serde(default = "default_memory_kib")]
  pub memory_kib: u32,
  /// Number of iterations
  #[serde(default = "default_iterations")]
  pub iterations: u32,
  /// Degree of parallelism
  #[serde(default = "default_parallelism")]
  pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
  19456
}

fn default_iterations() -> u32 {
  2
}

fn default_parallelism() -> u32 {
  1
}

impl Default for HashingParams {
  fn default() -> Self {
    Self {
      memory_kib: default_memory_kib(),
      iterations: default_iterations(),
      parallelism: default_parallelism(),
    }
  }
}

impl HashingParams {
  /// Minimal cost, only suitable for tests
  #[cfg(test)]
  pub fn fast_insecure() -> Self {
    Self {
      memory_kib: 1024,
      iterations: 1,
      parallelism: 1,
    }
  }
}

/// Argon2id password hasher implementation
///
/// Defaults follow the OWASP baseline: 19 MiB memory, 2 iterations, 1 lane.
/// Hashing and verification run on the blocking pool since their cost is
/// intentionally high.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  /// Creates a new Argon2PasswordHasher with the given work factor
  pub fn new(params: HashingParams) -> Result<Self, AuthError> {
    let params = Params::new(
      params.memory_kib,
      params.iterations,
      params.parallelism,
      Some(Params::DEFAULT_OUTPUT_LEN),
    )
    .map_err(|e| {
      AuthError::Hash(HashError::HashingFailed(format!(
        "Failed to create Argon2 params: {}",
        e
      )))
    })?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    Ok(Self { argon2 })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let argon2 = self.argon2.clone();
    let password = password.clone();

    let hash = tokio::task::spawn_blocking(move || {
      let salt = SaltString::generate(&mut rand::rngs::OsRng);
      argon2
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| HashError::HashingFailed(format!("Hashing task failed: {}", e)))?
    .map_err(|e| HashError::HashingFailed(e.to_string()))?;

    Ok(PasswordHash::from_hash(hash)?)
  }

  /// Uses argon2's constant-time comparison; a mismatch is `Ok(false)`
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError> {
    let argon2 = self.argon2.clone();
    let password = password.clone();
    let hash = hashed_password.as_str().to_string();

    let outcome = tokio::task::spawn_blocking(move || {
      let parsed_hash = Argon2PasswordHash::new(&hash)?;
      match argon2.verify_password(password.as_str().as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
      }
    })
    .await
    .map_err(|e| HashError::VerificationFailed(format!("Verification task failed: {}", e)))?;

    outcome.map_err(|e| AuthError::Hash(HashError::from(e)))
  }
}
