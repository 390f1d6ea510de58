//! First-time setup: bind a bot token to the chat that messaged the bot.

use tracing::info;

use crate::config::{Config, ConfigStore};
use crate::confirm::Confirm;
use crate::error::{Error, Result};
use crate::telegram::{first_chat_id, BotApi};

pub const CONFIRM_PROMPT: &str = "Please send a message to your bot in Telegram and press Enter...";

/// Wait for the operator, discover the chat ID from pending updates and
/// persist it together with `token`.
///
/// Nothing is written unless a chat ID was found.
pub async fn run<C: Confirm + ?Sized>(
    token: &str,
    store: &ConfigStore,
    api_url: &str,
    confirm: &mut C,
) -> Result<Config> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::InvalidArgument("bot token is empty".to_string()));
    }

    confirm.confirm(CONFIRM_PROMPT)?;

    let api = BotApi::with_url(api_url, token)?;
    let updates = api.get_updates().await?;
    let chat_id = first_chat_id(&updates).ok_or(Error::NoUpdates)?;
    info!(chat_id, "Discovered chat");

    let config = Config::new(token, chat_id);
    store.save(&config)?;

    println!("✅ Configuration saved!\nChat ID: {}", chat_id);
    Ok(config)
}
