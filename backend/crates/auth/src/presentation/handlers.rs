//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::client::{SourceAddress, extract_client_ip, extract_fingerprint};

use crate::application::config::AuthConfig;
use crate::application::{CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase};
use crate::domain::repository::{AdminRepository, AdminSessionRepository, LoginAttemptRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, LoginResponse, SessionStatusResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AdminRepository + LoginAttemptRepository + AdminSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/admin/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AdminRepository + LoginAttemptRepository + AdminSessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let source = SourceAddress::from_request(
        &headers,
        Some(addr.ip()),
        state.config.trust_forwarded_headers,
    )
    .ok_or_else(|| AuthError::Internal("client address unavailable".to_string()))?;

    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        username: req.username,
        password: req.password,
    };

    let output = use_case.execute(input, source, fingerprint).await?;

    let cookie = state
        .config
        .cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/admin/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: AdminRepository + LoginAttemptRepository + AdminSessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token).await;
    }

    let cookie = state.config.cookie().build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/admin/status
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: AdminRepository + LoginAttemptRepository + AdminSessionRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));

    let Ok(fingerprint) = extract_fingerprint(&headers, client_ip) else {
        return Ok(Json(SessionStatusResponse::anonymous()));
    };

    let Some(token) =
        platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name)
    else {
        return Ok(Json(SessionStatusResponse::anonymous()));
    };

    let use_case =
        CheckSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    match use_case.execute(&token, &fingerprint.hash).await {
        Ok(info) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            username: Some(info.username),
            expires_at_ms: Some(info.expires_at_ms),
        })),
        Err(_) => Ok(Json(SessionStatusResponse::anonymous())),
    }
}
