//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use listings::{ListingsConfig, PgListingRepository, listings_router, moderation_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,listings=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Forwarded headers are only safe to trust behind a reverse proxy
    // that strips client-supplied values
    let trust_forwarded = env::var("TRUST_PROXY_HEADERS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    // Auth configuration
    let mut auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "SESSION_SECRET must decode to 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            session_secret: secret,
            ..AuthConfig::with_random_secret()
        }
    };

    auth_config.trust_forwarded_headers = trust_forwarded;

    let listings_config = ListingsConfig {
        trust_forwarded_headers: trust_forwarded,
        ..ListingsConfig::default()
    };

    let auth_repo = PgAuthRepository::new(pool.clone());
    let listing_repo = PgListingRepository::new(pool.clone());

    // Startup cleanup: expired sessions and stale quota counters.
    // Errors here should not prevent server startup.
    match auth_repo.delete_expired_sessions().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }

    match listing_repo
        .cleanup_old_quotas(listings_config.quota_retention_days)
        .await
    {
        Ok(rows) => {
            tracing::info!(quota_rows_deleted = rows, "Quota cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Quota cleanup failed, continuing anyway");
        }
    }

    // Ensure the admin account from the environment exists
    bootstrap_admin(&auth_repo, &auth_config).await?;

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Moderation routes sit behind the admin session middleware
    let middleware_state = auth::middleware::AuthMiddlewareState {
        repo: Arc::new(auth_repo.clone()),
        config: Arc::new(auth_config.clone()),
    };

    let moderation = moderation_router(listing_repo.clone(), listings_config.clone()).layer(
        axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let state = middleware_state.clone();
                async move { auth::middleware::require_admin_session(state, req, next).await }
            },
        ),
    );

    let admin_routes = auth_router(auth_repo.clone(), auth_config).merge(moderation);

    // Build router
    let app = Router::new()
        .nest(
            "/api/listings",
            listings_router(listing_repo, listings_config),
        )
        .nest("/api/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Create the admin account named in ADMIN_USERNAME/ADMIN_PASSWORD.
///
/// Skipped with a warning when the variables are unset; existing
/// accounts are left untouched.
async fn bootstrap_admin(repo: &PgAuthRepository, config: &AuthConfig) -> anyhow::Result<()> {
    let (username, password) = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
        (Ok(u), Ok(p)) => (u, p),
        _ => {
            tracing::warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin bootstrap");
            return Ok(());
        }
    };

    let use_case = auth::application::EnsureAdminUseCase::new(
        Arc::new(repo.clone()),
        Arc::new(config.clone()),
    );

    let created = use_case
        .execute(&username, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Admin bootstrap failed: {e}"))?;

    if !created {
        tracing::info!("Admin account already provisioned");
    }

    Ok(())
}
