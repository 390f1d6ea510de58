//! turtle - share files to Telegram through your own bot
//!
//! This library provides:
//! - A JSON config store for the bot token and destination chat
//! - A small Telegram Bot API client (`getUpdates`, `sendDocument`)
//! - The setup, send and clean flows behind the `turtle` CLI

pub mod config;
pub mod confirm;
pub mod error;
pub mod telegram;

// Re-export common types
pub use config::{Config, ConfigStore, CONFIG_FILE};
pub use confirm::{Confirm, StdinConfirm};
pub use error::{Error, Result};
pub use telegram::{BotApi, TELEGRAM_API_URL};

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
