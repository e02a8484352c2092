pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  CurrentUserResponse, ErrorResponse, LoginRequest, LoginResponse, MessageResponse,
  RegisterRequest, RegisterResponse,
};
pub use errors::{ApiError, AuthErrorKind};
pub use handlers::auth::{current_user_handler, login_handler, register_handler, test_handler};
pub use middleware::{AuthMiddleware, AuthUser, RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{AuthRouteDependencies, configure_auth_routes, health_check};
