//! Remove the saved configuration

use tracing::debug;

use crate::config::ConfigStore;
use crate::error::Result;

/// Returns whether a config file was actually deleted.
pub fn run(store: &ConfigStore) -> Result<bool> {
    debug!(path = %store.path().display(), "Removing config");
    let removed = store.remove()?;
    if removed {
        println!("✅ Configuration removed");
    } else {
        println!("ℹ️ No configuration found");
    }
    Ok(removed)
}
