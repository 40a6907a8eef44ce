//! Notification settings commands.

use clap::Subcommand;
use focusnotes_core::NotificationSettings;

use crate::common::{self, CliError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show all settings
    Show,
    /// Get a settings value
    Get {
        /// Settings key (e.g. "enabled", "daily_reminder_time")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
}

pub async fn run(action: ConfigAction) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let settings = NotificationSettings::load()?;
            println!("{}", toml::to_string_pretty(&settings)?);
        }
        ConfigAction::Get { key } => {
            let settings = NotificationSettings::load()?;
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown settings key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = NotificationSettings::load()?;
            settings.set(&key, &value)?;
            // Keep the running app in agreement with what was persisted,
            // including the daily streak reminder schedule.
            let app = common::open_app()?;
            app.apply_settings(settings).await;
            println!("{key} = {value}");
        }
    }
    Ok(())
}
