pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{NewUser, TokenClaims, TokenPayload, User, UserChanges};
pub use errors::{AuthError, HashError, RepositoryError};
pub use value_objects::{AccessToken, Email, Password, PasswordHash, UserId, ValueObjectError};
