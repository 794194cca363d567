//! Authentication routes — register, login, refresh.

use axum::{Json, Router, extract::State, routing::post};
use folio_common::{
    error::{FolioError, FolioResult},
    models::user::{LoginRequest, RegisterRequest, UserResponse, default_nickname},
    validation::validate_request,
};
use folio_db::repository::users;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    auth::{self, TokenPair},
};

/// Auth router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh_token))
}

#[derive(Serialize)]
struct AuthResponse {
    user: UserResponse,
    #[serde(flatten)]
    tokens: TokenPair,
}

/// POST /api/v1/auth/register
///
/// Create a new account. Returns user profile + JWT tokens.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> FolioResult<Json<AuthResponse>> {
    validate_request(&body)?;

    // Check email availability
    if users::find_by_email(&state.db.pool, &body.email)
        .await?
        .is_some()
    {
        return Err(FolioError::AlreadyExists {
            resource: "Email".into(),
        });
    }

    // Hash password with Argon2id
    let password_hash = auth::hash_password(&body.password)
        .map_err(|e| FolioError::Internal(anyhow::anyhow!("{e}")))?;

    let nickname = body
        .nickname
        .clone()
        .unwrap_or_else(|| default_nickname(&body.email));

    let user_id = Uuid::now_v7();
    let user = users::create_user(&state.db.pool, user_id, &body.email, &password_hash, &nickname)
        .await?;

    // Generate tokens
    let config = folio_common::config::get();
    let tokens = auth::generate_token_pair(
        user.id,
        "user",
        &config.auth.jwt_secret,
        config.auth.access_token_ttl_secs,
        config.auth.refresh_token_ttl_secs,
    )
    .map_err(|e| FolioError::Internal(e.into()))?;

    tracing::info!(user_id = %user.id, "New user registered");

    Ok(Json(AuthResponse {
        user: user.into(),
        tokens,
    }))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns JWT tokens.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> FolioResult<Json<AuthResponse>> {
    validate_request(&body)?;

    // Find user
    let user = users::find_by_email(&state.db.pool, &body.email)
        .await?
        .ok_or(FolioError::InvalidCredentials)?;

    // Verify password
    let valid = auth::verify_password(&body.password, &user.password_hash)
        .map_err(|_| FolioError::InvalidCredentials)?;

    if !valid {
        return Err(FolioError::InvalidCredentials);
    }

    // Deactivated accounts cannot log in
    if !user.is_active {
        return Err(FolioError::Forbidden);
    }

    // Generate tokens
    let config = folio_common::config::get();
    let tokens = auth::generate_token_pair(
        user.id,
        user.role.as_str(),
        &config.auth.jwt_secret,
        config.auth.access_token_ttl_secs,
        config.auth.refresh_token_ttl_secs,
    )
    .map_err(|e| FolioError::Internal(e.into()))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: user.into(),
        tokens,
    }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new token pair.
async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshRequest>,
) -> FolioResult<Json<TokenPair>> {
    let config = folio_common::config::get();

    // Validate the refresh token
    let claims = auth::validate_token(&body.refresh_token, &config.auth.jwt_secret)
        .map_err(|_| FolioError::InvalidToken)?;

    if claims.token_type != "refresh" {
        return Err(FolioError::InvalidToken);
    }

    let user_id: Uuid = claims.sub.parse().map_err(|_| FolioError::InvalidToken)?;

    // Verify user still exists and is active
    let user = users::find_by_id(&state.db.pool, user_id)
        .await?
        .ok_or(FolioError::InvalidToken)?;

    if !user.is_active {
        return Err(FolioError::Forbidden);
    }

    let tokens = auth::generate_token_pair(
        user.id,
        &claims.role,
        &config.auth.jwt_secret,
        config.auth.access_token_ttl_secs,
        config.auth.refresh_token_ttl_secs,
    )
    .map_err(|e| FolioError::Internal(e.into()))?;

    Ok(Json(tokens))
}

#[derive(serde::Deserialize)]
struct RefreshRequest {
    refresh_token: String,
}
