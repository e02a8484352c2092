use async_trait::async_trait;
use chrono::Duration;

use super::entities::{NewUser, TokenClaims, TokenPayload, User, UserChanges};
use super::errors::AuthError;
use super::value_objects::{AccessToken, Email, Password, PasswordHash, UserId};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Persists a new user and returns it with its assigned id.
  ///
  /// Implementations must enforce email uniqueness themselves and report a
  /// violation as `RepositoryError::DuplicateKey`.
  async fn create(&self, user: NewUser) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;

  /// Finds a user by their email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Applies a partial update, returning `None` when the user does not exist
  async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, AuthError>;

  /// Removes a user, returning whether anything was deleted
  async fn delete(&self, id: UserId) -> Result<bool, AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a hashed password.
  ///
  /// A mismatch is `Ok(false)`, not an error.
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}

/// Service trait for signed identity tokens
pub trait TokenIssuer: Send + Sync {
  /// Signs `payload` into a token that expires after `expiry`
  fn issue(&self, payload: &TokenPayload, expiry: Duration) -> Result<AccessToken, AuthError>;

  /// Checks signature and expiry, returning the embedded claims
  fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}
