//! Persisted bot configuration
//!
//! A single JSON record `{bot_token, chat_id}` kept at an explicit path,
//! by default `~/.turtle_config.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// File name of the config inside the home directory
pub const CONFIG_FILE: &str = ".turtle_config.json";

/// Bot credentials plus the chat files are sent to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub bot_token: String,
    pub chat_id: i64,
}

impl Config {
    pub fn new(bot_token: impl Into<String>, chat_id: i64) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id,
        }
    }

    /// Both fields must be set before anything can be sent.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            return Err(Error::InvalidConfig("bot_token is empty".to_string()));
        }
        if self.chat_id == 0 {
            return Err(Error::InvalidConfig("chat_id is zero".to_string()));
        }
        Ok(())
    }
}

/// Reads and writes the [`Config`] file at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.turtle_config.json`
    pub fn at_home() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Resolve `~/.turtle_config.json` from `HOME` (or `USERPROFILE` on Windows)
    pub fn default_path() -> Result<PathBuf> {
        let home = std::env::var_os("HOME")
            .filter(|v| !v.is_empty())
            .or_else(|| std::env::var_os("USERPROFILE").filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                Error::InvalidArgument(
                    "cannot determine home directory; set TURTLE_CONFIG".to_string(),
                )
            })?;
        Ok(PathBuf::from(home).join(CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<Config> {
        debug!(path = %self.path.display(), "Loading config");
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotConfigured(self.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            Error::Decode(format!(
                "malformed config {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Overwrite the file with `config`.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut json = serde_json::to_string_pretty(config)?;
        json.push('\n');
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "Config saved");
        Ok(())
    }

    /// Delete the file. Returns `false` when there was nothing to delete.
    pub fn remove(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
