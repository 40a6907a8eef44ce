//! Badge collection commands.

use chrono::Local;
use clap::Subcommand;

use crate::common::{self, CliError};

#[derive(Subcommand)]
pub enum BadgeAction {
    /// List the badge catalog
    List {
        /// Only earned badges
        #[arg(long)]
        earned: bool,
    },
}

pub async fn run(action: BadgeAction) -> Result<(), CliError> {
    let app = common::open_app()?;

    match action {
        BadgeAction::List { earned } => {
            let storage = app.snapshot().await?;
            for badge in storage.stats.badges.iter().filter(|b| b.earned || !earned) {
                let when = badge
                    .earned_at
                    .map(|ts| format!(" (earned {})", ts.with_timezone(&Local).format("%Y-%m-%d")))
                    .unwrap_or_default();
                let mark = if badge.earned { "★" } else { "·" };
                println!(
                    "{mark} {} {} — {}{when}",
                    badge.emoji, badge.title, badge.description
                );
            }
        }
    }
    Ok(())
}
