use chrono::Duration;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::entities::{NewUser, TokenClaims, TokenPayload, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, TokenIssuer, UserRepository};
use super::value_objects::{AccessToken, Email, Password, PasswordHash, UserId};

/// Plaintext behind the decoy hash checked when a login names an unknown email
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-users";

/// Tunables for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  /// Lifetime of issued access tokens
  pub token_ttl: Duration,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      token_ttl: Duration::hours(1),
    }
  }
}

/// Authentication service implementing core business logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_issuer: Arc<dyn TokenIssuer>,
  config: AuthServiceConfig,
  decoy_hash: OnceCell<PasswordHash>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      password_hasher,
      token_issuer,
      config,
      decoy_hash: OnceCell::new(),
    }
  }

  /// Registers a new user with email and password
  ///
  /// # Errors
  /// Returns `AuthError::DuplicateUser` if the email is already registered,
  /// including when a concurrent registration wins the store's uniqueness check
  pub async fn register(
    &self,
    email: Email,
    password: Password,
    name: Option<String>,
  ) -> Result<User, AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      tracing::info!(email = %email, "Registration rejected: email already registered");
      return Err(AuthError::DuplicateUser);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let candidate = NewUser::new(email.into_inner(), password_hash.into_inner(), name);

    let user = match self.user_repo.create(candidate).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(AuthError::DuplicateUser);
      }
      Err(e) => return Err(e),
    };

    tracing::info!(user_id = %user.id, email = %user.email, "User registered");

    Ok(user)
  }

  /// Authenticates a user and issues an access token
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for an unknown email and for a
  /// wrong password alike
  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(User, AccessToken), AuthError> {
    let Some(user) = self.user_repo.find_by_email(&email).await? else {
      self.verify_against_decoy(&password).await;
      tracing::warn!(email = %email, "Login failed");
      return Err(AuthError::InvalidCredentials);
    };

    let password_hash = PasswordHash::from_hash(user.password_hash.as_str())?;

    if !self.password_hasher.verify(&password, &password_hash).await? {
      tracing::warn!(email = %email, "Login failed");
      return Err(AuthError::InvalidCredentials);
    }

    if !user.is_active {
      tracing::warn!(user_id = %user.id, "Login refused for inactive account");
      return Err(AuthError::AccountInactive);
    }

    let token = self
      .token_issuer
      .issue(&TokenPayload::from(&user), self.config.token_ttl)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((user, token))
  }

  /// Verifies an access token and returns its claims
  pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
    self.token_issuer.verify(token).inspect_err(|e| {
      tracing::debug!(error = %e, "Token verification failed");
    })
  }

  /// Loads a user by id
  ///
  /// # Errors
  /// Returns `AuthError::UserNotFound` if no such user exists
  pub async fn get_user(&self, id: UserId) -> Result<User, AuthError> {
    self
      .user_repo
      .find_by_id(id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  /// Resolves a bearer token to the user it names
  pub async fn current_user(&self, token: &str) -> Result<User, AuthError> {
    let claims = self.verify_token(token)?;
    self.get_user(claims.payload.subject).await
  }

  /// Computes the decoy hash up front so no login request pays for it
  pub async fn prepare_decoy(&self) -> Result<(), AuthError> {
    self.decoy_hash().await.map(|_| ())
  }

  /// Fails a login whose email or password could not be parsed
  ///
  /// Costs one decoy verification, like a login for an unknown email.
  pub async fn reject_malformed_login(&self) -> AuthError {
    if let Ok(password) = Password::new(DECOY_PASSWORD) {
      self.verify_against_decoy(&password).await;
    }
    tracing::warn!("Login failed: malformed credentials");
    AuthError::InvalidCredentials
  }

  async fn decoy_hash(&self) -> Result<&PasswordHash, AuthError> {
    self
      .decoy_hash
      .get_or_try_init(|| async {
        let decoy_password = Password::new(DECOY_PASSWORD).map_err(AuthError::from)?;
        self.password_hasher.hash(&decoy_password).await
      })
      .await
  }

  /// Spends one hash verification so unknown emails cost as much as wrong passwords
  async fn verify_against_decoy(&self, password: &Password) {
    match self.decoy_hash().await {
      Ok(decoy) => {
        let _ = self.password_hasher.verify(password, decoy).await;
      }
      Err(e) => tracing::error!(error = %e, "Decoy hash unavailable"),
    }
  }
}
