use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("User already exists")]
  DuplicateUser,

  #[error("Invalid credentials")]
  InvalidCredentials,

  #[error("Account is inactive")]
  AccountInactive,

  #[error("User not found")]
  UserNotFound,

  #[error("Configuration error: {0}")]
  Configuration(String),

  #[error("Token has expired")]
  TokenExpired,

  #[error("Token is invalid")]
  TokenInvalid,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}

// Automatic conversions from external error types

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}

impl From<argon2::password_hash::Error> for HashError {
  fn from(error: argon2::password_hash::Error) -> Self {
    use argon2::password_hash::Error;
    match error {
      Error::PhcStringField | Error::PhcStringTrailingData => HashError::InvalidFormat,
      Error::Password => HashError::VerificationFailed("Invalid password".to_string()),
      _ => HashError::HashingFailed(error.to_string()),
    }
  }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
  fn from(error: jsonwebtoken::errors::Error) -> Self {
    use jsonwebtoken::errors::ErrorKind;
    match error.kind() {
      ErrorKind::ExpiredSignature => AuthError::TokenExpired,
      _ => AuthError::TokenInvalid,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use jsonwebtoken::errors::{Error as JwtError, ErrorKind};

  #[test]
  fn test_expired_jwt_maps_to_token_expired() {
    let error: AuthError = JwtError::from(ErrorKind::ExpiredSignature).into();
    assert!(matches!(error, AuthError::TokenExpired));
  }

  #[test]
  fn test_other_jwt_errors_map_to_token_invalid() {
    for kind in [
      ErrorKind::InvalidSignature,
      ErrorKind::InvalidToken,
      ErrorKind::InvalidAlgorithm,
    ] {
      let error: AuthError = JwtError::from(kind).into();
      assert!(matches!(error, AuthError::TokenInvalid));
    }
  }

  #[test]
  fn test_argon2_format_error_maps_to_invalid_format() {
    let error: HashError = argon2::password_hash::Error::PhcStringField.into();
    assert!(matches!(error, HashError::InvalidFormat));
  }
}
