use argon2::PasswordHash as Argon2PasswordHash;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Password is required")]
  PasswordEmpty,

  #[error("Password is too long (maximum {max} characters)")]
  PasswordTooLong { max: usize },

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid user id: {0}")]
  InvalidUserId(String),
}

// ============================================================================
// Email Value Object
// ============================================================================

/// Syntactically valid email address.
///
/// Stored exactly as given: lookups and the uniqueness constraint are
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    Ok(Self(email))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plaintext password, wiped from memory when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.is_empty() {
      return Err(ValueObjectError::PasswordEmpty);
    }

    if password.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id PHC string)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Creates a new PasswordHash from an existing hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  /// Returns the hash as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// UserId Value Object
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
  /// Creates a new random UserId
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }

  /// Creates a UserId from an existing UUID
  pub fn from_uuid(uuid: Uuid) -> Self {
    Self(uuid)
  }

  /// Parses a UserId from its hyphenated string form
  pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
    Uuid::parse_str(value)
      .map(Self)
      .map_err(|_| ValueObjectError::InvalidUserId(value.to_string()))
  }

  /// Returns the inner UUID
  pub fn into_inner(self) -> Uuid {
    self.0
  }
}

impl Default for UserId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<Uuid> for UserId {
  fn from(uuid: Uuid) -> Self {
    Self(uuid)
  }
}

impl From<UserId> for Uuid {
  fn from(user_id: UserId) -> Self {
    user_id.0
  }
}

// ============================================================================
// AccessToken Value Object (Signed Bearer Token)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
  pub fn new(token: impl Into<String>) -> Self {
    Self(token.into())
  }

  /// Returns the token as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for AccessToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("AccessToken(***)")
  }
}

impl fmt::Display for AccessToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_valid() {
    let email = Email::new("a@x.com").unwrap();
    assert_eq!(email.as_str(), "a@x.com");
  }

  #[test]
  fn test_email_keeps_case() {
    let email = Email::new("Alice@Example.com").unwrap();
    assert_eq!(email.as_str(), "Alice@Example.com");
  }

  #[test]
  fn test_email_invalid() {
    assert!(matches!(
      Email::new("not-an-email"),
      Err(ValueObjectError::InvalidEmail(_))
    ));
  }

  #[test]
  fn test_password_empty() {
    assert!(matches!(
      Password::new(""),
      Err(ValueObjectError::PasswordEmpty)
    ));
  }

  #[test]
  fn test_password_too_long() {
    let long = "a".repeat(129);
    assert!(matches!(
      Password::new(long),
      Err(ValueObjectError::PasswordTooLong { max: 128 })
    ));
  }

  #[test]
  fn test_password_length_counts_characters() {
    assert!(Password::new("é".repeat(128)).is_ok());
    assert!(matches!(
      Password::new("é".repeat(129)),
      Err(ValueObjectError::PasswordTooLong { max: 128 })
    ));
  }

  #[test]
  fn test_password_is_redacted() {
    let password = Password::new("secret1").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
    assert_eq!(password.to_string(), "***");
  }

  #[test]
  fn test_password_hash_rejects_garbage() {
    assert!(matches!(
      PasswordHash::from_hash("plaintext"),
      Err(ValueObjectError::InvalidPasswordHash)
    ));
  }

  #[test]
  fn test_user_id_parse() {
    let id = UserId::new();
    assert_eq!(UserId::parse(&id.to_string()).unwrap(), id);
    assert!(UserId::parse("nope").is_err());
  }

  #[test]
  fn test_access_token_is_redacted() {
    let token = AccessToken::new("header.payload.signature");
    assert_eq!(format!("{:?}", token), "AccessToken(***)");
    assert_eq!(token.as_str(), "header.payload.signature");
  }
}
