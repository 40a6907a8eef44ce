//! CLI command implementations.

pub mod badge;
pub mod config;
pub mod day;
pub mod note;
pub mod pomodoro;
pub mod stats;
pub mod task;
