//! Chat assistant service

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::ChatWebhookClient;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatMessageInput {
    /// At most 2000 characters
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    /// Conversation id; a new conversation starts when absent
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub session_id: String,
}

#[derive(Clone)]
pub struct ChatService {
    client: Option<ChatWebhookClient>,
}

impl ChatService {
    pub fn new(client: Option<ChatWebhookClient>) -> Self {
        Self { client }
    }

    pub async fn send_message(&self, input: ChatMessageInput) -> AppResult<ChatReply> {
        input.validate()?;
        if input.message.trim().is_empty() {
            return Err(AppError::Validation {
                field: "message".to_string(),
                message: "Message must not be blank".to_string(),
            });
        }

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Chat webhook is not configured".to_string()))?;

        let session_id = input
            .session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        tracing::info!(session_id = %session_id, "Forwarding chat message");
        let reply = client.send(&input.message, &session_id).await?;

        Ok(ChatReply { reply, session_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(message: &str) -> ChatMessageInput {
        ChatMessageInput {
            message: message.to_string(),
            session_id: None,
        }
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let err = ChatService::new(None).send_message(input("")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "message"));
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let err = ChatService::new(None).send_message(input("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_oversized_message_rejected() {
        let long = "a".repeat(2001);
        let err = ChatService::new(None).send_message(input(&long)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_unconfigured_webhook() {
        let err = ChatService::new(None)
            .send_message(input("How much milk is left?"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
