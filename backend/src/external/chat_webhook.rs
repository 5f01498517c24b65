//! Chat assistant webhook client
//!
//! Messages are forwarded to an automation webhook which answers with
//! `{"output": "..."}` (older flows answer with `{"message": "..."}`).

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Chat webhook client
#[derive(Clone)]
pub struct ChatWebhookClient {
    client: Client,
    webhook_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookRequest<'a> {
    message: &'a str,
    session_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct WebhookResponse {
    output: Option<String>,
    message: Option<String>,
}

impl WebhookResponse {
    fn into_reply(self) -> AppResult<String> {
        self.output
            .or(self.message)
            .ok_or_else(|| AppError::ChatService("Webhook response had no reply".to_string()))
    }
}

impl ChatWebhookClient {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }

    /// Send one user message and return the assistant's reply
    pub async fn send(&self, message: &str, session_id: &str) -> AppResult<String> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&WebhookRequest {
                message,
                session_id,
            })
            .send()
            .await
            .map_err(|e| AppError::ChatService(format!("Webhook request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ChatService(format!(
                "Webhook error: {} - {}",
                status, body
            )));
        }

        let data: WebhookResponse = response
            .json()
            .await
            .map_err(|e| AppError::ChatService(format!("Failed to parse webhook response: {}", e)))?;

        data.into_reply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_session_id() {
        let body = serde_json::to_value(WebhookRequest {
            message: "How many bananas?",
            session_id: "abc",
        })
        .unwrap();
        assert_eq!(body["sessionId"], "abc");
        assert_eq!(body["message"], "How many bananas?");
    }

    #[test]
    fn test_reply_prefers_output() {
        let response: WebhookResponse =
            serde_json::from_str(r#"{"output": "150 in stock", "message": "ignored"}"#).unwrap();
        assert_eq!(response.into_reply().unwrap(), "150 in stock");
    }

    #[test]
    fn test_reply_falls_back_to_message() {
        let response: WebhookResponse = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert_eq!(response.into_reply().unwrap(), "hello");
    }

    #[test]
    fn test_reply_missing() {
        let err = WebhookResponse::default().into_reply().unwrap_err();
        assert!(matches!(err, AppError::ChatService(_)));
    }
}
