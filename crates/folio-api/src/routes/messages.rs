//! Message routes — contact a creator, read your inbox.

use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    middleware,
    routing::{get, post},
};
use folio_common::{
    error::{FolioError, FolioResult},
    models::message::{Message, SendMessageRequest},
    validation::validate_request,
};
use folio_db::repository::{messages, users};
use serde::Serialize;
use std::sync::Arc;

use crate::{AppState, middleware::AuthContext};

const MAILBOX_PAGE: i64 = 100;

/// Messages router. All endpoints require auth.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/messages", post(send_message))
        .route("/messages/inbox", get(inbox))
        .route("/messages/sent", get(sent))
        .route("/messages/{id}/read", post(mark_read))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware))
}

/// POST /api/v1/messages
async fn send_message(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendMessageRequest>,
) -> FolioResult<(axum::http::StatusCode, Json<Message>)> {
    validate_request(&body)?;

    if body.recipient_id == auth.user_id {
        return Err(FolioError::Validation {
            message: "Cannot message yourself".into(),
        });
    }

    // Recipient must exist and be active
    let recipient = users::find_by_id(&state.db.pool, body.recipient_id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Recipient".into(),
        })?;
    if !recipient.is_active {
        return Err(FolioError::NotFound {
            resource: "Recipient".into(),
        });
    }

    let message =
        messages::create_message(&state.db.pool, auth.user_id, body.recipient_id, &body.body)
            .await?;

    tracing::info!(message_id = message.id, sender = %auth.user_id, "Message sent");

    Ok((axum::http::StatusCode::CREATED, Json(message)))
}

#[derive(Serialize)]
struct MessageListResponse {
    messages: Vec<Message>,
}

/// GET /api/v1/messages/inbox
async fn inbox(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> FolioResult<Json<MessageListResponse>> {
    let messages = messages::inbox(&state.db.pool, auth.user_id, MAILBOX_PAGE).await?;
    Ok(Json(MessageListResponse { messages }))
}

/// GET /api/v1/messages/sent
async fn sent(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> FolioResult<Json<MessageListResponse>> {
    let messages = messages::sent(&state.db.pool, auth.user_id, MAILBOX_PAGE).await?;
    Ok(Json(MessageListResponse { messages }))
}

/// POST /api/v1/messages/:id/read — recipient only.
async fn mark_read(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> FolioResult<Json<Message>> {
    let message = messages::find_by_id(&state.db.pool, id)
        .await?
        .ok_or(FolioError::NotFound {
            resource: "Message".into(),
        })?;

    if message.recipient_id != auth.user_id {
        return Err(FolioError::Forbidden);
    }

    let message = messages::mark_read(&state.db.pool, id).await?;
    Ok(Json(message))
}
