use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::UserId;

/// Response containing current user information
#[derive(Debug, Clone)]
pub struct GetCurrentUserResponse {
  /// Unique identifier of the user
  pub user_id: UserId,
  /// User's email address
  pub email: String,
  pub name: Option<String>,
  pub roles: Vec<String>,
  pub is_active: bool,
  /// Timestamp when the user account was created
  pub created_at: DateTime<Utc>,
}

/// Use case for getting the authenticated user
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  /// Creates a new instance of GetCurrentUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the get current user use case
  ///
  /// # Arguments
  /// * `user_id` - Subject of an already verified access token
  ///
  /// # Errors
  /// Returns `AuthError::UserNotFound` if the account no longer exists
  pub async fn execute(&self, user_id: UserId) -> Result<GetCurrentUserResponse, AuthError> {
    let user = self.auth_service.get_user(user_id).await?;

    Ok(GetCurrentUserResponse {
      user_id: user.id,
      email: user.email,
      name: user.name,
      roles: user.roles,
      is_active: user.is_active,
      created_at: user.created_at,
    })
  }
}
