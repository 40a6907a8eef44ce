//! Persistence: the JSON storage envelope and the TOML settings file.
//!
//! Data lives under `~/.config/focusnotes[-dev]/`: `storage.json` for the
//! envelope, `config.toml` for notification settings.

mod blob;
mod config;

pub use blob::{BlobStore, JsonFileStore, MemoryStore};
pub use config::NotificationSettings;

use std::path::PathBuf;

/// Returns `~/.config/focusnotes[-dev]/` based on FOCUSNOTES_ENV.
///
/// Set FOCUSNOTES_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSNOTES_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusnotes-dev")
    } else {
        base_dir.join("focusnotes")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
