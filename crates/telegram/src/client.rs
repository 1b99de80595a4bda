//! Telegram Bot API transport.

use std::time::Duration;

use async_trait::async_trait;
use insider_core::TelegramConfig;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SendError;

/// Something that delivers one formatted message.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), SendError>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Posts messages to one chat through `sendMessage`.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: Client,
    api_url: String,
    token: String,
    chat_id: i64,
}

impl TelegramClient {
    /// # Errors
    /// Returns an error if the token or chat id is missing, or the HTTP
    /// client cannot be built.
    pub fn new(config: &TelegramConfig) -> Result<Self, SendError> {
        let token = config.token.clone().ok_or(SendError::MissingToken)?;
        let chat_id = config.chat_id.ok_or(SendError::MissingChat)?;
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token,
            chat_id,
        })
    }
}

#[async_trait]
impl MessageSink for TelegramClient {
    async fn send(&self, text: &str) -> Result<(), SendError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);
        debug!(chat_id = self.chat_id, len = text.len(), "sending telegram message");

        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            }))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        let parsed: Option<ApiResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            other => {
                let description = other
                    .and_then(|r| r.description)
                    .unwrap_or(body);
                warn!(status = status.as_u16(), %description, "telegram API error");
                Err(SendError::Api {
                    status: status.as_u16(),
                    description,
                })
            }
        }
    }
}
