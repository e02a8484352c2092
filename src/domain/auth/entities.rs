use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::UserId;

/// Role granted to every freshly registered user
pub const DEFAULT_ROLE: &str = "user";

/// User entity representing a persisted user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier assigned by the store
  pub id: UserId,
  /// User's email address (unique, case-sensitive)
  pub email: String,
  /// Argon2id hash of the user's password
  pub password_hash: String,
  /// Optional display name
  pub name: Option<String>,
  /// Granted roles, never empty
  pub roles: Vec<String>,
  /// Whether the account may log in
  pub is_active: bool,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a user from stored fields (for reconstruction)
  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: UserId,
    email: String,
    password_hash: String,
    name: Option<String>,
    roles: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      password_hash,
      name,
      roles,
      is_active,
      created_at,
      updated_at,
    }
  }

  /// Applies a partial update and bumps `updated_at`
  pub fn apply(&mut self, changes: UserChanges) {
    if let Some(name) = changes.name {
      self.name = name;
    }
    if let Some(roles) = changes.roles {
      if !roles.is_empty() {
        self.roles = roles;
      }
    }
    if let Some(is_active) = changes.is_active {
      self.is_active = is_active;
    }
    if let Some(password_hash) = changes.password_hash {
      self.password_hash = password_hash;
    }
    self.updated_at = Utc::now();
  }

  pub fn has_role(&self, role: &str) -> bool {
    self.roles.iter().any(|r| r == role)
  }
}

/// A user that has not been persisted yet; the store assigns its id
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
  pub email: String,
  pub password_hash: String,
  pub name: Option<String>,
  pub roles: Vec<String>,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl NewUser {
  /// Creates a registration candidate with default roles and an active flag
  pub fn new(email: String, password_hash: String, name: Option<String>) -> Self {
    let now = Utc::now();
    Self {
      email,
      password_hash,
      name,
      roles: vec![DEFAULT_ROLE.to_string()],
      is_active: true,
      created_at: now,
      updated_at: now,
    }
  }

  /// Attaches a store-assigned id
  pub fn into_user(self, id: UserId) -> User {
    User {
      id,
      email: self.email,
      password_hash: self.password_hash,
      name: self.name,
      roles: self.roles,
      is_active: self.is_active,
      created_at: self.created_at,
      updated_at: self.updated_at,
    }
  }
}

/// Partial update of a user. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
  /// `Some(None)` clears the name
  pub name: Option<Option<String>>,
  /// Ignored when empty
  pub roles: Option<Vec<String>>,
  pub is_active: Option<bool>,
  pub password_hash: Option<String>,
}

/// Identity claims embedded in an issued token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
  pub subject: UserId,
  pub email: String,
  pub roles: Vec<String>,
}

impl From<&User> for TokenPayload {
  fn from(user: &User) -> Self {
    Self {
      subject: user.id,
      email: user.email.clone(),
      roles: user.roles.clone(),
    }
  }
}

/// Claims recovered from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
  pub payload: TokenPayload,
  /// Issued at (Unix timestamp)
  pub issued_at: i64,
  /// Expiration time (Unix timestamp)
  pub expires_at: i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_token_payload_from_user() {
    let user =
      NewUser::new("a@x.com".to_string(), "hash".to_string(), None).into_user(UserId::new());
    let payload = TokenPayload::from(&user);

    assert_eq!(payload.subject, user.id);
    assert_eq!(payload.email, "a@x.com");
    assert_eq!(payload.roles, vec!["user".to_string()]);
  }

  #[test]
  fn test_new_user_defaults() {
    let user = NewUser::new("a@x.com".to_string(), "hash".to_string(), None);

    assert_eq!(user.roles, vec!["user".to_string()]);
    assert!(user.is_active);
    assert_eq!(user.created_at, user.updated_at);
  }

  #[test]
  fn test_into_user_keeps_fields() {
    let candidate = NewUser::new(
      "a@x.com".to_string(),
      "hash".to_string(),
      Some("Alice".to_string()),
    );
    let id = UserId::new();
    let user = candidate.clone().into_user(id);

    assert_eq!(user.id, id);
    assert_eq!(user.email, candidate.email);
    assert_eq!(user.name.as_deref(), Some("Alice"));
    assert!(user.has_role("user"));
  }

  #[test]
  fn test_apply_changes() {
    let mut user =
      NewUser::new("a@x.com".to_string(), "hash".to_string(), None).into_user(UserId::new());
    let before = user.updated_at;

    user.apply(UserChanges {
      name: Some(Some("Alice".to_string())),
      roles: Some(vec!["user".to_string(), "admin".to_string()]),
      is_active: Some(false),
      password_hash: None,
    });

    assert_eq!(user.name.as_deref(), Some("Alice"));
    assert!(user.has_role("admin"));
    assert!(!user.is_active);
    assert_eq!(user.password_hash, "hash");
    assert!(user.updated_at >= before);
  }

  #[test]
  fn test_apply_ignores_empty_roles() {
    let mut user =
      NewUser::new("a@x.com".to_string(), "hash".to_string(), None).into_user(UserId::new());

    user.apply(UserChanges {
      roles: Some(Vec::new()),
      ..Default::default()
    });

    assert_eq!(user.roles, vec!["user".to_string()]);
  }
}
