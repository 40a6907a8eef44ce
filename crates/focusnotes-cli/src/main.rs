use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "focusnotes", version, about = "Focus Notes CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Note management
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Pomodoro sessions
    Pomodoro {
        #[command(subcommand)]
        action: commands::pomodoro::PomodoroAction,
    },
    /// Day boundary control
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Progress overview
    Stats {
        /// Raw JSON output
        #[arg(long)]
        json: bool,
    },
    /// Badge collection
    Badges {
        #[command(subcommand)]
        action: commands::badge::BadgeAction,
    },
    /// Notification settings
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action).await,
        Commands::Note { action } => commands::note::run(action).await,
        Commands::Pomodoro { action } => commands::pomodoro::run(action).await,
        Commands::Day { action } => commands::day::run(action).await,
        Commands::Stats { json } => commands::stats::run(json).await,
        Commands::Badges { action } => commands::badge::run(action).await,
        Commands::Config { action } => commands::config::run(action).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
