use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    dto::chat_dto::{ChatResponse, MarkReadResponse, MessageResponse, PostMessagePayload, UnreadResponse},
    error::Result,
    middleware::auth::Identity,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/chat/{application_id}/messages",
    params(
        ("application_id" = i64, Path, description = "Accepted application the chat belongs to")
    ),
    responses(
        (status = 200, description = "Conversation, oldest first", body = ChatResponse),
        (status = 403, description = "Not a party of the application"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn list_messages(
    State(state): State<AppState>,
    identity: Identity,
    Path(application_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let messages = state
        .chat_service
        .list_messages(&identity, application_id)
        .await?;
    Ok(Json(ChatResponse {
        application_id,
        messages: messages
            .into_iter()
            .map(|m| MessageResponse::for_viewer(m, identity.user_id))
            .collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/chat/{application_id}/messages",
    params(
        ("application_id" = i64, Path, description = "Accepted application the chat belongs to")
    ),
    request_body = PostMessagePayload,
    responses(
        (status = 201, description = "Message sent", body = MessageResponse),
        (status = 403, description = "Not a party of the application"),
        (status = 409, description = "Application is not accepted")
    )
)]
#[axum::debug_handler]
pub async fn post_message(
    State(state): State<AppState>,
    identity: Identity,
    Path(application_id): Path<i64>,
    Json(payload): Json<PostMessagePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let message = state
        .chat_service
        .post_message(&identity, application_id, &payload.content)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::for_viewer(message, identity.user_id)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/chat/{application_id}/read",
    params(
        ("application_id" = i64, Path, description = "Accepted application the chat belongs to")
    ),
    responses(
        (status = 200, description = "Messages addressed to the caller marked read", body = MarkReadResponse)
    )
)]
#[axum::debug_handler]
pub async fn mark_read(
    State(state): State<AppState>,
    identity: Identity,
    Path(application_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let marked = state.chat_service.mark_read(&identity, application_id).await?;
    Ok(Json(MarkReadResponse { marked }))
}

#[utoipa::path(
    get,
    path = "/api/chat/unread",
    responses(
        (status = 200, description = "Unread messages addressed to the caller", body = UnreadResponse)
    )
)]
#[axum::debug_handler]
pub async fn unread_count(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse> {
    let unread = state.chat_service.unread_count(&identity).await?;
    Ok(Json(UnreadResponse { unread }))
}
