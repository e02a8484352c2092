use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::{NewUser, User, UserChanges},
  errors::AuthError,
  ports::UserRepository,
  value_objects::{Email, UserId},
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  email: String,
  password_hash: String,
  name: Option<String>,
  roles: Vec<String>,
  is_active: bool,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      UserId::from_uuid(row.id),
      row.email,
      row.password_hash,
      row.name,
      row.roles,
      row.is_active,
      row.created_at,
      row.updated_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: NewUser) -> Result<User, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (
                email,
                password_hash,
                name,
                roles,
                is_active,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id,
                email,
                password_hash,
                name,
                roles,
                is_active,
                created_at,
                updated_at
            "#,
    )
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.name)
    .bind(&user.roles)
    .bind(user.is_active)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, name, roles, is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id.into_inner())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, name, roles, is_active, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, AuthError> {
    let mut tx = self.pool.begin().await?;

    let current = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, name, roles, is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            FOR UPDATE
            "#,
    )
    .bind(id.into_inner())
    .fetch_optional(&mut *tx)
    .await?;

    let Some(current) = current else {
      return Ok(None);
    };

    let mut user: User = current.into();
    user.apply(changes);

    let row = sqlx::query_as::<_, UserRow>(
      r#"
            UPDATE users
            SET
                password_hash = $2,
                name = $3,
                roles = $4,
                is_active = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING
                id,
                email,
                password_hash,
                name,
                roles,
                is_active,
                created_at,
                updated_at
            "#,
    )
    .bind(id.into_inner())
    .bind(&user.password_hash)
    .bind(&user.name)
    .bind(&user.roles)
    .bind(user.is_active)
    .bind(user.updated_at)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(row.into()))
  }

  async fn delete(&self, id: UserId) -> Result<bool, AuthError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id.into_inner())
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}
