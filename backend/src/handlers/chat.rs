//! HTTP handlers for the chat assistant

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::chat::{ChatMessageInput, ChatReply};
use crate::services::ChatService;
use crate::AppState;

/// Forward a message to the chat assistant
pub async fn send_message(
    State(state): State<AppState>,
    Json(input): Json<ChatMessageInput>,
) -> AppResult<Json<ChatReply>> {
    let service = ChatService::new(state.chat.clone());
    let reply = service.send_message(input).await?;
    Ok(Json(reply))
}
