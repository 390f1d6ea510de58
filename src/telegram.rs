//! Minimal Telegram Bot API client.
//!
//! Only the two methods turtle needs: `getUpdates` to discover the chat a
//! bot is talking to, and `sendDocument` to upload a file there.
//! Docs: <https://core.telegram.org/bots/api>

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{Error, Result};

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client bound to a single bot token.
#[derive(Clone)]
pub struct BotApi {
    http: Client,
    api_url: String,
    token: String,
}

impl fmt::Debug for BotApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotApi")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl BotApi {
    /// Client for the public Bot API endpoint.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_url(TELEGRAM_API_URL, token)
    }

    /// Client for a custom API root (local Bot API server, tests).
    pub fn with_url(api_url: &str, token: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Fetch pending updates.
    pub async fn get_updates(&self) -> Result<Vec<Update>> {
        let response = self.http.get(self.method_url("getUpdates")).send().await?;

        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse<Vec<Update>> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                warn!(status = %status, "getUpdates failed");
                return Err(Error::Api(format!("{}: {}", status, body)));
            }
            Err(e) => {
                return Err(Error::Decode(format!(
                    "invalid getUpdates response: {}",
                    e
                )))
            }
        };

        let updates = envelope.into_result()?;
        info!(count = updates.len(), "Fetched updates");
        Ok(updates)
    }

    /// Upload the file at `path` as a document to `chat_id`.
    ///
    /// The file is opened before any request is made, so a bad path never
    /// reaches the network.
    pub async fn send_document(&self, chat_id: i64, path: &Path) -> Result<()> {
        let file = match tokio::fs::File::open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::FileNotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(Error::InvalidArgument(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        let size = metadata.len();

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        info!(chat_id, file = %file_name, size, "Uploading document");

        let form = Form::new().part(
            "document",
            Part::stream_with_length(file, size).file_name(file_name),
        );

        let response = self
            .http
            .post(self.method_url("sendDocument"))
            .query(&[("chat_id", chat_id)])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "sendDocument failed");
            return Err(Error::Api(format!("{}: {}", status, text)));
        }

        info!(status = %status, "Document sent");
        Ok(())
    }
}

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    /// Unwrap `result`, turning `ok: false` into [`Error::Api`].
    pub fn into_result(self) -> Result<T> {
        if !self.ok {
            let reason = self
                .description
                .unwrap_or_else(|| "request was not successful (ok=false)".to_string());
            return Err(Error::Api(match self.error_code {
                Some(code) => format!("{} ({})", reason, code),
                None => reason,
            }));
        }
        self.result
            .ok_or_else(|| Error::Decode("response is missing `result`".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub edited_message: Option<Message>,
    #[serde(default)]
    pub channel_post: Option<Message>,
    #[serde(default)]
    pub edited_channel_post: Option<Message>,
    #[serde(default)]
    pub my_chat_member: Option<ChatMemberUpdated>,
}

impl Update {
    /// Chat this update belongs to, if it carries one.
    pub fn chat_id(&self) -> Option<i64> {
        self.message
            .as_ref()
            .or(self.edited_message.as_ref())
            .or(self.channel_post.as_ref())
            .or(self.edited_channel_post.as_ref())
            .map(|m| m.chat.id)
            .or_else(|| self.my_chat_member.as_ref().map(|m| m.chat.id))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: i64,
    pub chat: Chat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// First chat found in `updates`, in delivery order.
pub fn first_chat_id(updates: &[Update]) -> Option<i64> {
    updates.iter().find_map(Update::chat_id)
}
