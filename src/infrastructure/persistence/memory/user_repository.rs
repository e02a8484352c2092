use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::auth::{
  entities::{NewUser, User, UserChanges},
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
  value_objects::{Email, UserId},
};

/// Process-local implementation of the UserRepository trait
///
/// The email uniqueness check and the insert happen under one write lock, so
/// it gives the same guarantee as the `UNIQUE` constraint of the Postgres store.
#[derive(Default)]
pub struct InMemoryUserRepository {
  users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
  /// Creates an empty repository
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of stored users with exactly this email
  pub async fn count_by_email(&self, email: &str) -> usize {
    self
      .users
      .read()
      .await
      .values()
      .filter(|user| user.email == email)
      .count()
  }

  /// Number of stored users
  pub async fn len(&self) -> usize {
    self.users.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.users.read().await.is_empty()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: NewUser) -> Result<User, AuthError> {
    let mut users = self.users.write().await;

    if users.values().any(|existing| existing.email == user.email) {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey(
        format!("users_email_key: {}", user.email),
      )));
    }

    let user = user.into_user(UserId::new());
    users.insert(user.id, user.clone());

    Ok(user)
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
    Ok(self.users.read().await.get(&id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    Ok(
      self
        .users
        .read()
        .await
        .values()
        .find(|user| user.email == email.as_str())
        .cloned(),
    )
  }

  async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, AuthError> {
    let mut users = self.users.write().await;

    Ok(users.get_mut(&id).map(|user| {
      user.apply(changes);
      user.clone()
    }))
  }

  async fn delete(&self, id: UserId) -> Result<bool, AuthError> {
    Ok(self.users.write().await.remove(&id).is_some())
  }
}
