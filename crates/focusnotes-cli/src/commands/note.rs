//! Note management commands.

use clap::Subcommand;

use crate::common::{self, CliError};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Create a new note
    Add {
        /// Note title
        title: String,
        /// Note body
        #[arg(long, default_value = "")]
        content: String,
    },
    /// List notes
    List {
        /// Raw JSON output
        #[arg(long)]
        json: bool,
    },
    /// Update a note
    Edit {
        /// Note ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
}

pub async fn run(action: NoteAction) -> Result<(), CliError> {
    let app = common::open_app()?;

    match action {
        NoteAction::Add { title, content } => {
            let note = app.add_note(&title, &content).await?;
            println!("Note created: {}", note.id);
        }
        NoteAction::List { json } => {
            let storage = app.snapshot().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&storage.notes)?);
            } else {
                for note in &storage.notes {
                    println!(
                        "{}  {} (updated {})",
                        note.id,
                        note.title,
                        note.updated_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        NoteAction::Edit { id, title, content } => {
            let note = app
                .edit_note(&id, title.as_deref(), content.as_deref())
                .await?;
            println!("Note updated: {}", note.id);
        }
        NoteAction::Delete { id } => {
            app.delete_note(&id).await?;
            println!("Note deleted: {id}");
        }
    }
    Ok(())
}
