//! Shared fixtures for unit tests

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::services::{AuthService, AuthServiceConfig};
use crate::domain::auth::value_objects::{Email, Password, PasswordHash};
use crate::infrastructure::persistence::memory::InMemoryUserRepository;
use crate::infrastructure::security::{Argon2PasswordHasher, HashingParams, JwtTokenIssuer};

pub const TEST_SECRET: &str = "test-secret-key-for-testing";

fn fast_hasher() -> Argon2PasswordHasher {
  Argon2PasswordHasher::new(HashingParams::fast_insecure()).expect("valid argon2 params")
}

/// Argon2 hasher that records how often each operation runs
pub struct CountingHasher {
  inner: Argon2PasswordHasher,
  hashes: AtomicUsize,
  verifies: AtomicUsize,
}

impl CountingHasher {
  pub fn new() -> Self {
    Self {
      inner: fast_hasher(),
      hashes: AtomicUsize::new(0),
      verifies: AtomicUsize::new(0),
    }
  }

  pub fn hashes(&self) -> usize {
    self.hashes.load(Ordering::SeqCst)
  }

  pub fn verifies(&self) -> usize {
    self.verifies.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl PasswordHasher for CountingHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    self.hashes.fetch_add(1, Ordering::SeqCst);
    self.inner.hash(password).await
  }

  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError> {
    self.verifies.fetch_add(1, Ordering::SeqCst);
    self.inner.verify(password, hashed_password).await
  }
}

/// Auth service over an in-memory store with a cheap hasher
pub fn auth_service() -> (Arc<AuthService>, Arc<InMemoryUserRepository>) {
  let (service, repo, _hasher) = counted_auth_service();
  (service, repo)
}

/// Like `auth_service`, also handing back the hasher to read its counters
pub fn counted_auth_service() -> (
  Arc<AuthService>,
  Arc<InMemoryUserRepository>,
  Arc<CountingHasher>,
) {
  let repo = Arc::new(InMemoryUserRepository::new());
  let hasher = Arc::new(CountingHasher::new());
  let issuer = Arc::new(JwtTokenIssuer::new(Some(TEST_SECRET.to_string())));

  let service = Arc::new(AuthService::new(
    repo.clone(),
    hasher.clone(),
    issuer,
    AuthServiceConfig::default(),
  ));

  (service, repo, hasher)
}

pub async fn register(service: &AuthService, email: &str, password: &str) -> User {
  service
    .register(
      Email::new(email).expect("valid email"),
      Password::new(password).expect("valid password"),
      None,
    )
    .await
    .expect("registration succeeds")
}

/// Logs in and returns the raw bearer token
pub async fn login(service: &AuthService, email: &str, password: &str) -> String {
  let (_, token) = service
    .login(
      Email::new(email).expect("valid email"),
      Password::new(password).expect("valid password"),
    )
    .await
    .expect("login succeeds");

  token.into_inner()
}
