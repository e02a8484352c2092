use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userauth::{
  adapters::http::{
    AuthRouteDependencies, RequestIdMiddleware, configure_auth_routes, health_check,
  },
  domain::auth::ports::UserRepository,
  domain::auth::services::{AuthService, AuthServiceConfig},
  infrastructure::{
    config::{Config, DatabaseConfig, StorageBackend},
    persistence::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    security::{Argon2PasswordHasher, JwtTokenIssuer},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "userauth=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting userauth service");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  let token_ttl = config.jwt.token_ttl().map_err(|e| {
    tracing::error!("Invalid JWT expiration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;

  let user_repo: Arc<dyn UserRepository> = match config.database.backend {
    StorageBackend::Postgres => {
      let db_pool = connect_database(&config.database).await?;

      tracing::info!("Running database migrations");
      sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
      tracing::info!("Database migrations completed");

      Arc::new(PostgresUserRepository::new(db_pool))
    }
    StorageBackend::Memory => {
      tracing::warn!("Using in-memory user store; users are lost on restart");
      Arc::new(InMemoryUserRepository::new())
    }
  };

  // Initialize security services
  let password_hasher = Arc::new(
    Argon2PasswordHasher::new(config.security.password_hashing)
      .expect("Failed to create password hasher"),
  );
  let token_issuer = Arc::new(JwtTokenIssuer::new(config.jwt.secret.clone()));

  // Initialize domain service
  let auth_service = Arc::new(AuthService::new(
    user_repo,
    password_hasher,
    token_issuer,
    AuthServiceConfig { token_ttl },
  ));

  auth_service
    .prepare_decoy()
    .await
    .expect("Failed to compute decoy password hash");

  let auth_routes = AuthRouteDependencies::new(auth_service);

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let auth_routes = auth_routes.clone();

    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      .service(web::scope("/api/v1/auth").configure(|cfg| configure_auth_routes(cfg, auth_routes)))
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Opens the Postgres pool, bounded by the configured connect timeout
async fn connect_database(config: &DatabaseConfig) -> std::io::Result<PgPool> {
  let url = config.url.as_deref().ok_or_else(|| {
    tracing::error!("database.url is required for the postgres backend");
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      "database.url is required for the postgres backend",
    )
  })?;

  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.max_connections)
      .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
      .connect(url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");
  Ok(db_pool)
}
