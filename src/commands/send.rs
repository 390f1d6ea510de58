//! Send a local file to the configured chat

use std::path::Path;

use tracing::debug;

use crate::config::ConfigStore;
use crate::error::Result;
use crate::telegram::BotApi;

/// Upload `file` as a document to the chat saved in `store`.
pub async fn run(file: &Path, store: &ConfigStore, api_url: &str) -> Result<()> {
    let config = store.load()?;
    config.validate()?;
    debug!(file = %file.display(), chat_id = config.chat_id, "Sending file");

    let api = BotApi::with_url(api_url, &config.bot_token)?;
    api.send_document(config.chat_id, file).await?;

    println!("✅ File sent successfully!");
    Ok(())
}
