/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `chat`: Interactive chat with saved sessions
- `history`: List, show and delete saved sessions; one-shot summaries

Handlers are thin: session semantics live in `chat::ChatController` and
`storage::SessionStore`.
*/

use crate::config::Config;
use crate::error::Result;
use crate::storage::SessionStore;

// Special commands parser for the interactive loop
pub mod special_commands;

// Saved session management
pub mod history;

/// Open the session store configured in `config`
pub fn open_store(config: &Config) -> Result<SessionStore> {
    let dir = config.storage.resolved_history_dir();
    let store = SessionStore::new(&dir).map_err(crate::error::ChatvaultError::from)?;
    tracing::debug!("Using history directory {}", dir.display());
    Ok(store)
}

// Chat command handler
pub mod chat {
    //! Interactive chat handler.
    //!
    //! Creates the provider and the store, then runs a readline loop that
    //! either dispatches special commands or sends the line to the model.

    use super::*;
    use crate::chat::ChatController;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::providers::{create_provider, Message};
    use crate::storage::StoredSession;
    use crate::theme::Theme;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::io::Write;

    /// Start interactive chat
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (model and theme overrides already applied)
    /// * `resume` - Optional saved session to continue
    pub async fn run_chat(config: Config, resume: Option<String>) -> Result<()> {
        tracing::info!("Starting interactive chat");

        let store = open_store(&config)?;
        let provider = create_provider(&config.provider)?;
        let mut chat = ChatController::new(provider, store);
        let mut theme = config.theme();

        if let Some(id) = resume {
            chat.open(&id)?;
        }

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&chat, theme);
        if !chat.session().is_empty() {
            print_transcript(chat.session().messages(), theme);
        }

        loop {
            let prompt = theme.format_prompt(chat.session().id());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::None => send_prompt(&mut chat, trimmed, theme).await,
                        SpecialCommand::Exit => break,
                        SpecialCommand::Help => print_help(),
                        SpecialCommand::ShowStatus => print_status_display(&chat, theme),
                        SpecialCommand::SwitchTheme(requested) => {
                            let old = theme;
                            theme = requested.unwrap_or_else(|| old.toggle());
                            println!("Switched from {} to {} theme\n", old, theme.colored_tag());
                        }
                        SpecialCommand::NewSession => match chat.new_session() {
                            Ok(saved) => {
                                if saved {
                                    println!("{}", "Previous chat saved.".green());
                                }
                                println!("Started new chat {}\n", chat.session().id().cyan());
                            }
                            Err(e) => eprintln!("{}\n", format!("Error: {}", e).red()),
                        },
                        SpecialCommand::ListSessions => match chat.entries() {
                            Ok(entries) => print_session_list(&entries, chat.session().id()),
                            Err(e) => eprintln!("{}\n", format!("Error: {}", e).red()),
                        },
                        SpecialCommand::Open(id) => match chat.open(&id) {
                            Ok(()) => {
                                println!("Loaded chat {}\n", chat.session().id().cyan());
                                print_transcript(chat.session().messages(), theme);
                            }
                            Err(e) => eprintln!("{}\n", format!("Error: {}", e).red()),
                        },
                        SpecialCommand::Delete(id) => {
                            let was_active = id == chat.session().id();
                            match chat.delete(&id) {
                                Ok(true) => {
                                    println!("{}", format!("Deleted chat {}", id).green());
                                    if was_active {
                                        println!(
                                            "Active chat was deleted; started {}",
                                            chat.session().id().cyan()
                                        );
                                    }
                                    println!();
                                }
                                Ok(false) => {
                                    println!("{}\n", format!("No saved chat named {}", id).yellow())
                                }
                                Err(e) => eprintln!("{}\n", format!("Error: {}", e).red()),
                            }
                        }
                        SpecialCommand::Clear => {
                            chat.clear();
                            println!("{}\n", "Chat cleared.".green());
                        }
                        SpecialCommand::Summarize(kind) => {
                            print_thinking();
                            match chat.summarize(kind).await {
                                Ok(summary) => {
                                    clear_thinking();
                                    println!("{}\n{}\n", kind.title().bold(), summary);
                                }
                                Err(e) => {
                                    clear_thinking();
                                    eprintln!("{}\n", format!("Error: {}", e).red());
                                }
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    async fn send_prompt(chat: &mut ChatController, prompt: &str, theme: Theme) {
        print_thinking();
        let result = chat.send(prompt).await;
        clear_thinking();

        match result {
            Ok(exchange) => {
                print_message(&Message::assistant(exchange.reply), theme);
                if let Some(usage) = exchange.usage {
                    tracing::debug!(
                        "Tokens: prompt {}, completion {}, total {}",
                        usage.prompt_tokens,
                        usage.completion_tokens,
                        usage.total_tokens
                    );
                }
                if let Some(e) = exchange.save_error {
                    eprintln!("{}\n", format!("Warning: chat not saved: {}", e).yellow());
                }
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {}", e).red());
                eprintln!("{}\n", "Your message is kept; try again or /new.".dimmed());
            }
        }
    }

    fn print_thinking() {
        print!("{}", "Thinking...".dimmed());
        let _ = std::io::stdout().flush();
    }

    fn clear_thinking() {
        print!("\r{}\r", " ".repeat(12));
        let _ = std::io::stdout().flush();
    }

    fn print_message(message: &Message, theme: Theme) {
        println!("{}: {}\n", theme.role_label(message.role), message.content);
    }

    fn print_transcript(messages: &[Message], theme: Theme) {
        for message in messages {
            print_message(message, theme);
        }
    }

    fn print_session_list(entries: &[StoredSession], active_id: &str) {
        if entries.is_empty() {
            println!("{}\n", "No saved chats yet.".yellow());
            return;
        }
        println!("\nSaved chats (most recent first):");
        for entry in entries {
            let marker = if entry.id == active_id { "*" } else { " " };
            println!(
                " {} {}  {}",
                marker,
                entry.id.cyan(),
                entry
                    .modified
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
            );
        }
        println!();
    }

    /// Display the welcome banner
    fn print_welcome_banner(chat: &ChatController, theme: Theme) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              Chatvault Interactive Chat - Welcome!           ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Session: {}", chat.session().id().cyan());
        println!("Model:   {}", chat.model());
        println!("Theme:   {} ({})\n", theme.colored_tag(), theme.description());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display status for '/status'
    fn print_status_display(chat: &ChatController, theme: Theme) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Chatvault Session Status                  ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Session:           {}", chat.session().id().cyan());
        println!("Conversation Size: {} messages", chat.session().len());
        println!("Model:             {}", chat.model());
        println!("Theme:             {} ({})", theme.colored_tag(), theme.description());
        println!("History Directory: {}", chat.store().dir().display());
        println!();
    }
}
