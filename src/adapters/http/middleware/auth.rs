use actix_web::{
  Error, HttpMessage,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  error::ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use super::request_id::RequestIdExt;
use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  application::auth::VerifyTokenUseCase,
  domain::auth::entities::TokenClaims,
};

/// Authentication middleware that validates bearer tokens
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies signature and expiry using VerifyTokenUseCase
/// 3. Attaches the TokenClaims to request extensions for downstream handlers
/// 4. Returns 401 Unauthorized if the token is missing, invalid or expired
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use userauth::application::auth::VerifyTokenUseCase;
/// # use userauth::adapters::http::middleware::auth::AuthMiddleware;
///
/// # fn example(verify_use_case: Arc<VerifyTokenUseCase>) {
/// let app = App::new()
///   .wrap(AuthMiddleware::new(verify_use_case))
///   .service(
///     web::resource("/protected")
///       .route(web::get().to(|| async { "Protected endpoint" }))
///   );
/// # }
/// ```
pub struct AuthMiddleware {
  verify_use_case: Arc<VerifyTokenUseCase>,
}

impl AuthMiddleware {
  /// Creates a new authentication middleware
  pub fn new(verify_use_case: Arc<VerifyTokenUseCase>) -> Self {
    Self { verify_use_case }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      verify_use_case: self.verify_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  verify_use_case: Arc<VerifyTokenUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let verify_use_case = self.verify_use_case.clone();

    Box::pin(async move {
      let verified = extract_bearer_token(&req)
        .and_then(|token| verify_use_case.execute(&token).map_err(ApiError::from));

      let claims = match verified {
        Ok(claims) => claims,
        Err(e) => {
          tracing::debug!(
            request_id = ?req.request().request_id(),
            path = %req.path(),
            error = %e,
            "Rejected unauthenticated request"
          );
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(claims);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

/// Extension trait to extract verified token claims from a request
pub trait AuthUser {
  /// Claims attached by AuthMiddleware.
  ///
  /// Fails with `InvalidToken` on routes that are not wrapped by the middleware.
  fn token_claims(&self) -> Result<TokenClaims, ApiError>;
}

impl AuthUser for actix_web::HttpRequest {
  fn token_claims(&self) -> Result<TokenClaims, ApiError> {
    self
      .extensions()
      .get::<TokenClaims>()
      .cloned()
      .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::http::StatusCode;
  use actix_web::test::{self, TestRequest};
  use actix_web::{App, HttpRequest, HttpResponse, web};

  use crate::test_support::{auth_service, login, register};

  #[test]
  fn test_extract_bearer_token_valid() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    let token = extract_bearer_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_bearer_token_missing() {
    let req = TestRequest::default().to_srv_request();

    assert!(extract_bearer_token(&req).is_err());
  }

  #[test]
  fn test_extract_bearer_token_invalid_format() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "InvalidFormat token"))
      .to_srv_request();

    assert!(extract_bearer_token(&req).is_err());
  }

  async fn whoami(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let claims = req.token_claims()?;
    Ok(HttpResponse::Ok().body(claims.payload.email))
  }

  #[actix_web::test]
  async fn test_middleware_attaches_claims() {
    let (service, _repo) = auth_service();
    register(&service, "a@x.com", "secret1").await;
    let token = login(&service, "a@x.com", "secret1").await;

    let app = test::init_service(
      App::new()
        .wrap(AuthMiddleware::new(Arc::new(VerifyTokenUseCase::new(
          service,
        ))))
        .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/whoami")
      .insert_header(("Authorization", format!("Bearer {}", token)))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "a@x.com");
  }

  #[actix_web::test]
  async fn test_middleware_rejects_bad_token() {
    let (service, _repo) = auth_service();

    let app = test::init_service(
      App::new()
        .wrap(AuthMiddleware::new(Arc::new(VerifyTokenUseCase::new(
          service,
        ))))
        .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/whoami")
      .insert_header(("Authorization", "Bearer not.a.token"))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::get().uri("/whoami").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[test]
  fn test_token_claims_without_middleware() {
    let req = TestRequest::default().to_http_request();

    assert!(req.token_claims().is_err());
  }

  #[actix_web::test]
  async fn test_rejection_keeps_request_id() {
    use super::super::request_id::RequestIdMiddleware;

    let (service, _repo) = auth_service();

    let app = test::init_service(
      App::new()
        .wrap(AuthMiddleware::new(Arc::new(VerifyTokenUseCase::new(
          service,
        ))))
        .wrap(RequestIdMiddleware::new())
        .route("/whoami", web::get().to(whoami)),
    )
    .await;

    let incoming = uuid::Uuid::new_v4().to_string();
    let req = TestRequest::get()
      .uri("/whoami")
      .insert_header(("x-request-id", incoming.clone()))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), incoming.as_str());
  }
}
