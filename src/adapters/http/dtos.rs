use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::auth::value_objects::UserId;

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(
    min = 6,
    max = 128,
    message = "Password must be between 6 and 128 characters"
  ))]
  pub password: String,

  /// Optional display name
  #[validate(length(
    min = 1,
    max = 255,
    message = "Name must be between 1 and 255 characters"
  ))]
  #[serde(default)]
  pub name: Option<String>,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Public view of a freshly registered user; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  pub id: UserId,
  pub email: String,
  pub name: Option<String>,
  pub roles: Vec<String>,
}

/// Response after successful user login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  pub access_token: String,
}

/// Response containing current user information
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
  pub id: UserId,
  pub email: String,
  pub name: Option<String>,
  pub roles: Vec<String>,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
}

/// Plain message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use validator::Validate;

  #[test]
  fn test_register_request_validation_valid() {
    let request = RegisterRequest {
      email: "a@x.com".to_string(),
      password: "secret1".to_string(),
      name: None,
    };

    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_register_request_validation_invalid_email() {
    let request = RegisterRequest {
      email: "invalid-email".to_string(),
      password: "secret1".to_string(),
      name: None,
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_register_request_validation_short_password() {
    let request = RegisterRequest {
      email: "a@x.com".to_string(),
      password: "short".to_string(),
      name: None,
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_register_request_validation_empty_name() {
    let request = RegisterRequest {
      email: "a@x.com".to_string(),
      password: "secret1".to_string(),
      name: Some(String::new()),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_register_request_name_is_optional() {
    let json = r#"{"email": "a@x.com", "password": "secret1"}"#;
    let request: RegisterRequest = serde_json::from_str(json).unwrap();

    assert!(request.name.is_none());
  }

  #[test]
  fn test_login_request_requires_password() {
    let request = LoginRequest {
      email: "a@x.com".to_string(),
      password: String::new(),
    };

    assert!(request.validate().is_err());
  }

  #[test]
  fn test_register_response_has_no_password_field() {
    let response = RegisterResponse {
      id: UserId::new(),
      email: "a@x.com".to_string(),
      name: None,
      roles: vec!["user".to_string()],
    };

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["roles"][0], "user");
  }

  #[test]
  fn test_register_password_limit_matches_domain() {
    use crate::domain::auth::value_objects::Password;

    for (password, accepted) in [("é".repeat(100), true), ("é".repeat(129), false)] {
      let request = RegisterRequest {
        email: "a@x.com".to_string(),
        password: password.clone(),
        name: None,
      };

      assert_eq!(request.validate().is_ok(), accepted);
      assert_eq!(Password::new(password).is_ok(), accepted);
    }
  }
}
