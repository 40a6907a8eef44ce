//! Shared helpers for CLI commands.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use focusnotes_core::{App, JsonFileStore, NotificationSettings};

pub type CliError = Box<dyn std::error::Error>;

/// Open the app against the default storage location with the persisted
/// settings. The CLI runs headless: notifications go nowhere.
pub fn open_app() -> Result<App, CliError> {
    let store = Arc::new(JsonFileStore::at_default_location()?);
    Ok(App::headless(store, NotificationSettings::load_or_default()))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, CliError> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

pub fn parse_time(s: &str) -> Result<NaiveTime, CliError> {
    Ok(NaiveTime::parse_from_str(s, "%H:%M")?)
}
