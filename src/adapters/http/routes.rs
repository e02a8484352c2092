use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserUseCase, RegisterUserUseCase, VerifyTokenUseCase,
};
use crate::domain::auth::services::AuthService;

use super::handlers::auth::{current_user_handler, login_handler, register_handler, test_handler};
use super::middleware::AuthMiddleware;

/// Use cases backing the auth routes
#[derive(Clone)]
pub struct AuthRouteDependencies {
  pub register_use_case: Arc<RegisterUserUseCase>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub verify_use_case: Arc<VerifyTokenUseCase>,
  pub get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl AuthRouteDependencies {
  /// Builds every use case over one shared service
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self {
      register_use_case: Arc::new(RegisterUserUseCase::new(auth_service.clone())),
      login_use_case: Arc::new(LoginUserUseCase::new(auth_service.clone())),
      verify_use_case: Arc::new(VerifyTokenUseCase::new(auth_service.clone())),
      get_user_use_case: Arc::new(GetCurrentUserUseCase::new(auth_service)),
    }
  }
}

/// Configure authentication routes
///
/// Mounts all authentication-related endpoints under the provided scope.
/// All routes are prefixed with the scope path (e.g., /api/v1/auth).
///
/// # Routes
///
/// - POST /register - Register a new user account
/// - POST /login - Authenticate and receive an access token
/// - GET /test - Fixed greeting, no authentication
/// - GET /me - Current user information (bearer token required)
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use userauth::domain::auth::services::AuthService;
/// # use userauth::adapters::http::routes::{AuthRouteDependencies, configure_auth_routes};
///
/// # fn example(auth_service: Arc<AuthService>) {
/// let deps = AuthRouteDependencies::new(auth_service);
/// let app = App::new().service(
///   web::scope("/api/v1/auth").configure(move |cfg| configure_auth_routes(cfg, deps.clone())),
/// );
/// # }
/// ```
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, deps: AuthRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.register_use_case))
    .app_data(web::Data::new(deps.login_use_case))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .route("/test", web::get().to(test_handler))
    .service(
      web::resource("/me")
        .app_data(web::Data::new(deps.get_user_use_case))
        .route(web::get().to(current_user_handler))
        .wrap(AuthMiddleware::new(deps.verify_use_case)),
    );
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
  "OK"
}
