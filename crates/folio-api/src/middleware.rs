//! Middleware — authentication extraction and the admin gate.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use folio_common::error::FolioError;
use folio_common::models::user::UserRole;
use folio_db::repository::users;
use std::sync::Arc;

use crate::{AppState, auth};

/// Authentication context extracted from the Authorization header.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: uuid::Uuid,
    pub role: String,
}

/// Extract and validate the JWT from the Authorization: Bearer <token> header.
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, FolioError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(FolioError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(FolioError::Unauthorized)?;

    let config = folio_common::config::get();
    let claims = auth::validate_token(token, &config.auth.jwt_secret)
        .map_err(|_| FolioError::InvalidToken)?;

    // Ensure it's an access token, not a refresh token
    if claims.token_type != "access" {
        return Err(FolioError::InvalidToken);
    }

    let user_id = claims
        .sub
        .parse::<uuid::Uuid>()
        .map_err(|_| FolioError::InvalidToken)?;

    let auth_ctx = AuthContext {
        user_id,
        role: claims.role,
    };

    // Insert auth context into request extensions for handlers to use
    request.extensions_mut().insert(auth_ctx);

    Ok(next.run(request).await)
}

/// Best-effort user extraction from an optional bearer token.
///
/// Used on public endpoints that personalize their response (liked flags,
/// follow state) when a valid token happens to be attached.
pub fn bearer_user(headers: &HeaderMap) -> Option<uuid::Uuid> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    let config = folio_common::config::get();
    let claims = auth::validate_token(token, &config.auth.jwt_secret).ok()?;
    if claims.token_type != "access" {
        return None;
    }
    claims.sub.parse().ok()
}

/// Admin gate — layered after `auth_middleware` on the admin routes.
///
/// The role claim in the token can be stale (demotions), so the current
/// role is read from the database, not the token.
pub async fn admin_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, FolioError> {
    let auth = request
        .extensions()
        .get::<AuthContext>()
        .ok_or(FolioError::Unauthorized)?;

    let user = users::find_by_id(&state.db.pool, auth.user_id)
        .await?
        .ok_or(FolioError::Unauthorized)?;

    if user.role != UserRole::Admin || !user.is_active {
        return Err(FolioError::Forbidden);
    }

    Ok(next.run(request).await)
}
