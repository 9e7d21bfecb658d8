use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState};

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub api_key: String,
}

#[derive(Serialize)]
pub struct UserInfoResponse {
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub api_key: String,
}

/// Authenticated identity, resolved by [`auth_middleware`] and handed to
/// handlers through request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Authentication middleware that checks:
/// 1. Session cookie (from login)
/// 2. `X-Api-Key` header
/// 3. `Authorization: Bearer <api_key>` header
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    // Check session first (fastest path for browser clients)
    if let Ok(Some(username)) = session.get::<String>("user").await
        && let Ok(Some(user)) = state.store().get_user_by_username(&username).await
    {
        tracing::Span::current().record("user_id", &user.username);
        request.extensions_mut().insert(CurrentUser {
            id: user.id,
            username: user.username,
        });
        return Ok(next.run(request).await);
    }

    if let Some(key) = extract_api_key(&headers)
        && let Ok(Some(user)) = state.store().verify_api_key(&key).await
    {
        tracing::Span::current().record("user_id", &user.username);
        request.extensions_mut().insert(CurrentUser {
            id: user.id,
            username: user.username,
        });
        return Ok(next.run(request).await);
    }

    let response = (StatusCode::UNAUTHORIZED, "Unauthorized");
    Ok(response.into_response())
}

/// Extract API key from headers
fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    // Check X-Api-Key header
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.to_string());
    }

    // Check Authorization: Bearer header
    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/signup
/// Register a new account, returns the API key and opens a session
pub async fn signup(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResponse>>), ApiError> {
    let result = state
        .auth_service()
        .signup(&payload.username, &payload.password)
        .await?;

    if let Err(e) = session.insert("user", &result.username).await {
        return Err(ApiError::internal(format!("Failed to create session: {e}")));
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(LoginResponse {
            username: result.username,
            api_key: result.api_key,
        })),
    ))
}

/// POST /auth/login
/// Authenticate with username and password, returns API key on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let result = state
        .auth_service()
        .login(&payload.username, &payload.password)
        .await?;

    if let Err(e) = session.insert("user", &result.username).await {
        return Err(ApiError::internal(format!("Failed to create session: {e}")));
    }

    Ok(Json(ApiResponse::success(LoginResponse {
        username: result.username,
        api_key: result.api_key,
    })))
}

/// POST /auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (StatusCode::OK, "Logged out")
}

/// GET /auth/me
/// Get current user information (requires authentication)
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    axum::Extension(user): axum::Extension<CurrentUser>,
) -> Result<Json<ApiResponse<UserInfoResponse>>, ApiError> {
    let info = state.auth_service().get_user_info(&user.username).await?;

    Ok(Json(ApiResponse::success(UserInfoResponse {
        username: info.username,
        created_at: info.created_at,
        updated_at: info.updated_at,
    })))
}

/// GET /auth/api-key
/// Get the current API key
pub async fn get_api_key(
    State(state): State<Arc<AppState>>,
    axum::Extension(user): axum::Extension<CurrentUser>,
) -> Result<Json<ApiResponse<ApiKeyResponse>>, ApiError> {
    let api_key = state.auth_service().get_api_key(&user.username).await?;

    Ok(Json(ApiResponse::success(ApiKeyResponse { api_key })))
}

/// POST /auth/api-key/regenerate
/// Replace the API key; the previous one stops working immediately
pub async fn regenerate_api_key(
    State(state): State<Arc<AppState>>,
    axum::Extension(user): axum::Extension<CurrentUser>,
) -> Result<Json<ApiResponse<ApiKeyResponse>>, ApiError> {
    let api_key = state
        .auth_service()
        .regenerate_api_key(&user.username)
        .await?;

    tracing::info!("API key regenerated for user: {}", user.username);

    Ok(Json(ApiResponse::success(ApiKeyResponse { api_key })))
}
