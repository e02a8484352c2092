use std::sync::Arc;

use crate::domain::auth::entities::TokenClaims;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Use case for checking a bearer token
pub struct VerifyTokenUseCase {
  auth_service: Arc<AuthService>,
}

impl VerifyTokenUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Returns the claims of a valid token
  ///
  /// # Errors
  /// `AuthError::TokenExpired`, `AuthError::TokenInvalid`, or
  /// `AuthError::Configuration` when no signing key is set
  pub fn execute(&self, token: &str) -> Result<TokenClaims, AuthError> {
    self.auth_service.verify_token(token)
  }
}
