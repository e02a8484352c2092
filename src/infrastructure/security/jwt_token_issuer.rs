use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::auth::entities::{TokenClaims, TokenPayload};
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::TokenIssuer;
use crate::domain::auth::value_objects::{AccessToken, UserId};

/// Claims as they travel inside the JWT
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
  /// Subject (user ID)
  sub: String,
  email: String,
  roles: Vec<String>,
  /// Issued at (Unix timestamp)
  iat: i64,
  /// Expiration time (Unix timestamp)
  exp: i64,
}

struct SigningKeys {
  encoding: EncodingKey,
  decoding: DecodingKey,
}

/// HS256 JWT issuer keyed by a process-wide shared secret
pub struct JwtTokenIssuer {
  keys: Option<SigningKeys>,
}

impl JwtTokenIssuer {
  /// Creates an issuer. An absent or empty secret leaves the issuer unusable:
  /// every call then fails with `AuthError::Configuration`.
  pub fn new(secret: Option<String>) -> Self {
    let keys = secret.filter(|s| !s.is_empty()).map(|secret| SigningKeys {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
    });

    if keys.is_none() {
      tracing::warn!("No JWT signing key configured; token issuance is disabled");
    }

    Self { keys }
  }

  fn keys(&self) -> Result<&SigningKeys, AuthError> {
    self
      .keys
      .as_ref()
      .ok_or_else(|| AuthError::Configuration("JWT signing key is not configured".to_string()))
  }

  fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
  }
}

impl TokenIssuer for JwtTokenIssuer {
  fn issue(&self, payload: &TokenPayload, expiry: Duration) -> Result<AccessToken, AuthError> {
    let keys = self.keys()?;

    let now = Utc::now();
    let expires_at = now
      .checked_add_signed(expiry)
      .ok_or_else(|| AuthError::Configuration(format!("Token expiry out of range: {}", expiry)))?;

    let claims = JwtClaims {
      sub: payload.subject.to_string(),
      email: payload.email.clone(),
      roles: payload.roles.clone(),
      iat: now.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
      .map_err(|e| AuthError::Configuration(format!("Failed to sign token: {}", e)))?;

    Ok(AccessToken::new(token))
  }

  fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
    let keys = self.keys()?;

    let data = decode::<JwtClaims>(token, &keys.decoding, &Self::validation())?;
    let claims = data.claims;

    let subject = UserId::parse(&claims.sub).map_err(|_| AuthError::TokenInvalid)?;

    Ok(TokenClaims {
      payload: TokenPayload {
        subject,
        email: claims.email,
        roles: claims.roles,
      },
      issued_at: claims.iat,
      expires_at: claims.exp,
    })
  }
}
