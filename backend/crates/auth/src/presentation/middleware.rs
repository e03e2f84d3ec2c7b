//! Auth Middleware
//!
//! Middleware for requiring an admin session on protected routes.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::client::{extract_client_ip, extract_fingerprint};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::{AdminRepository, AdminSessionRepository};
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AdminRepository + AdminSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that requires a valid admin session
pub async fn require_admin_session<R>(
    state: AuthMiddlewareState<R>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AdminRepository + AdminSessionRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();

    let client_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let client_ip = extract_client_ip(headers, client_ip);

    let fingerprint = match extract_fingerprint(headers, client_ip) {
        Ok(fp) => fp,
        Err(e) => return Err(AuthError::from(e).into_response()),
    };

    let token = platform::cookie::extract_cookie(headers, &state.config.session_cookie_name);

    let use_case =
        CheckSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let session_valid = if let Some(token) = token {
        use_case.is_valid(&token, &fingerprint.hash).await
    } else {
        false
    };

    if !session_valid {
        return Err((StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response());
    }

    Ok(next.run(req).await)
}
