use crate::chat::summarize_session;
use crate::cli::HistoryCommand;
use crate::commands::open_store;
use crate::config::Config;
use crate::error::{ChatvaultError, Result};
use crate::prompts::SummaryKind;
use crate::providers::create_provider;
use crate::session::ChatSession;
use crate::storage::{SessionRecord, SessionStore, StoredSession};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle history commands
pub fn handle_history(command: HistoryCommand, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    run_history_command(&store, command)
}

/// Run a history command against an open store
pub fn run_history_command(store: &SessionStore, command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List => {
            let entries = store.entries().map_err(ChatvaultError::from)?;

            if entries.is_empty() {
                println!("{}", "No saved chats found.".yellow());
                return Ok(());
            }

            println!("\nSaved Chats:");
            history_table(store, &entries).printstd();
            println!();
            println!(
                "Use {} to continue a chat.",
                "chatvault chat --resume <ID>".cyan()
            );
            println!();
        }
        HistoryCommand::Show { id, json } => {
            let record = store.load(&id).map_err(ChatvaultError::from)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print!("{}", render_transcript(&record));
            }
        }
        HistoryCommand::Delete { id } => {
            if store.delete(&id).map_err(ChatvaultError::from)? {
                println!("{}", format!("Deleted chat {}", id).green());
            } else {
                println!("{}", format!("No saved chat named {}", id).yellow());
            }
        }
    }

    Ok(())
}

/// Summarize a saved chat and print the result
pub async fn run_summarize(config: &Config, id: &str, kind: &str) -> Result<()> {
    let kind = SummaryKind::parse_str(kind).map_err(ChatvaultError::Config)?;
    let store = open_store(config)?;
    let record = store.load(id).map_err(ChatvaultError::from)?;
    let provider = create_provider(&config.provider)?;

    let summary =
        summarize_session(provider.as_ref(), &ChatSession::from_record(record), kind).await?;
    println!("{}\n{}", kind.title().bold(), summary);
    Ok(())
}

/// Table of saved chats in listing order
///
/// Records that cannot be read still get a row, marked as unreadable.
pub fn history_table(store: &SessionStore, entries: &[StoredSession]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Messages".bold(),
        "First Message".bold(),
        "Last Modified".bold()
    ]);

    for entry in entries {
        let (count, preview) = match store.load(&entry.id) {
            Ok(record) => (
                record.messages.len().to_string(),
                record
                    .messages
                    .first()
                    .map(|m| preview(&m.content, 40))
                    .unwrap_or_default(),
            ),
            Err(e) => ("-".to_string(), format!("(unreadable: {})", short_reason(&e))),
        };
        let modified = entry
            .modified
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();

        table.add_row(prettytable::row![entry.id.cyan(), count, preview, modified]);
    }

    table
}

/// Plain-text transcript of a record
pub fn render_transcript(record: &SessionRecord) -> String {
    let mut out = format!("Chat {} (saved {})\n\n", record.id, record.timestamp);
    for message in &record.messages {
        out.push_str(&format!("{}: {}\n\n", message.role, message.content));
    }
    out
}

fn preview(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() > max_chars {
        let cut: String = single_line.chars().take(max_chars - 3).collect();
        format!("{}...", cut)
    } else {
        single_line
    }
}

fn short_reason(err: &crate::error::StorageError) -> &'static str {
    match err {
        crate::error::StorageError::NotFound(_) => "missing",
        crate::error::StorageError::Corrupt { .. } => "corrupt",
        crate::error::StorageError::Unavailable(_) => "unavailable",
        crate::error::StorageError::InvalidId(_) => "invalid id",
    }
}
