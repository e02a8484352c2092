use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    CurrentUserResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse,
  },
  errors::ApiError,
  middleware::AuthUser,
};
use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase, RegisterUserCommand,
  RegisterUserUseCase,
};

/// Handler for user registration
///
/// POST /api/v1/auth/register
/// Body: RegisterRequest (JSON)
/// Response: RegisterResponse (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = RegisterUserCommand {
    email: request.email,
    password: request.password,
    name: request.name,
  };

  let user = use_case.execute(command).await?.user;

  // The password hash stops here
  let api_response = RegisterResponse {
    id: user.id,
    email: user.email,
    name: user.name,
    roles: user.roles,
  };

  Ok(HttpResponse::Created().json(api_response))
}

/// Handler for user login
///
/// POST /api/v1/auth/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = LoginUserCommand {
    email: request.email,
    password: request.password,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(LoginResponse {
    access_token: response.access_token,
  }))
}

/// Liveness probe for the auth scope
///
/// GET /api/v1/auth/test
pub async fn test_handler() -> HttpResponse {
  HttpResponse::Ok().json(MessageResponse {
    message: "Hello from auth controller".to_string(),
  })
}

/// Handler for getting current user information
///
/// GET /api/v1/auth/me
/// Headers: Authorization: Bearer <token>
/// Response: CurrentUserResponse (JSON) with status 200
pub async fn current_user_handler(
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let claims = http_req.token_claims()?;

  let response = use_case.execute(claims.payload.subject).await?;

  Ok(HttpResponse::Ok().json(CurrentUserResponse {
    id: response.user_id,
    email: response.email,
    name: response.name,
    roles: response.roles,
    is_active: response.is_active,
    created_at: response.created_at,
  }))
}
