//! Special commands parser for interactive chat
//!
//! Lines starting with `/` manage sessions instead of being sent to the
//! model. Command names are case-insensitive; session ids are passed through
//! as typed.

use crate::prompts::SummaryKind;
use crate::theme::Theme;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Save the current session (if non-empty) and start a fresh one
    NewSession,

    /// List saved sessions
    ListSessions,

    /// Make a saved session active
    Open(String),

    /// Delete a saved session
    Delete(String),

    /// Empty the active transcript, keeping its id
    Clear,

    /// Summarize the active transcript
    Summarize(SummaryKind),

    /// Switch to the given theme, or toggle when `None`
    SwitchTheme(Option<Theme>),

    /// Show session, model and theme
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the input to the model
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError` for unknown commands and bad or missing arguments.
///
/// # Examples
///
/// ```
/// use chatvault::commands::special_commands::{parse_special_command, SpecialCommand};
/// use chatvault::prompts::SummaryKind;
///
/// assert_eq!(
///     parse_special_command("/open 20240101_120000").unwrap(),
///     SpecialCommand::Open("20240101_120000".to_string())
/// );
/// assert_eq!(
///     parse_special_command("/summarize bullets").unwrap(),
///     SpecialCommand::Summarize(SummaryKind::ThreeBullets)
/// );
/// assert_eq!(parse_special_command("hello").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') {
        return Ok(match lower.as_str() {
            "exit" | "quit" => SpecialCommand::Exit,
            _ => SpecialCommand::None,
        });
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match name.as_str() {
        "/new" => no_argument("/new", arg, SpecialCommand::NewSession),
        "/history" | "/list" => no_argument("/history", arg, SpecialCommand::ListSessions),
        "/clear" => no_argument("/clear", arg, SpecialCommand::Clear),
        "/status" => no_argument("/status", arg, SpecialCommand::ShowStatus),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        "/open" | "/load" => {
            required_argument("/open", arg, "/open <session_id>").map(SpecialCommand::Open)
        }
        "/delete" => {
            required_argument("/delete", arg, "/delete <session_id>").map(SpecialCommand::Delete)
        }

        "/summarize" | "/summary" => {
            if arg.is_empty() {
                return Ok(SpecialCommand::Summarize(SummaryKind::default()));
            }
            SummaryKind::parse_str(arg)
                .map(SpecialCommand::Summarize)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/summarize".to_string(),
                    arg: arg.to_string(),
                })
        }

        "/theme" => {
            if arg.is_empty() {
                return Ok(SpecialCommand::SwitchTheme(None));
            }
            Theme::parse_str(arg)
                .map(|theme| SpecialCommand::SwitchTheme(Some(theme)))
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/theme".to_string(),
                    arg: arg.to_string(),
                })
        }

        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn no_argument(
    command: &str,
    arg: &str,
    cmd: SpecialCommand,
) -> Result<SpecialCommand, CommandError> {
    if arg.is_empty() {
        Ok(cmd)
    } else {
        Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
    }
}

fn required_argument(command: &str, arg: &str, usage: &str) -> Result<String, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        });
    }
    if arg.split_whitespace().count() > 1 {
        return Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        });
    }
    Ok(arg.to_string())
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat
=====================================

SESSIONS:
  /new                 - Save the current chat and start a new one
  /history             - List saved sessions (most recent first)
  /open <id>           - Continue a saved session
  /delete <id>         - Delete a saved session
  /clear               - Clear the current chat (keeps its id)

SUMMARIES:
  /summarize           - One-sentence summary of the current chat
  /summarize bullets   - Three bullet points
  /summarize keywords  - Top five keywords

DISPLAY:
  /theme               - Toggle between dark and light
  /theme <dark|light>  - Switch to a specific theme
  /status              - Show session, model and theme

OTHER:
  /help                - Show this help message
  exit, quit, /exit    - Leave the chat

Every completed exchange is saved automatically.
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(
            parse_special_command("what is rust?").unwrap(),
            SpecialCommand::None
        );
        assert_eq!(
            parse_special_command("exit strategy?").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_exit_aliases() {
        for input in ["exit", "QUIT", "/exit", "/quit", "  exit  "] {
            assert_eq!(parse_special_command(input).unwrap(), SpecialCommand::Exit);
        }
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(
            parse_special_command("/new").unwrap(),
            SpecialCommand::NewSession
        );
        assert_eq!(
            parse_special_command("/HISTORY").unwrap(),
            SpecialCommand::ListSessions
        );
        assert_eq!(parse_special_command("/clear").unwrap(), SpecialCommand::Clear);
        assert_eq!(
            parse_special_command("/status").unwrap(),
            SpecialCommand::ShowStatus
        );
        assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
    }

    #[test]
    fn test_parse_open_keeps_id_case() {
        assert_eq!(
            parse_special_command("/Open MyChat_01").unwrap(),
            SpecialCommand::Open("MyChat_01".to_string())
        );
    }

    #[test]
    fn test_parse_open_missing_argument() {
        let err = parse_special_command("/open").unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { .. }));
        assert!(err.to_string().contains("/open <session_id>"));
    }

    #[test]
    fn test_parse_delete() {
        assert_eq!(
            parse_special_command("/delete 20240101_120000").unwrap(),
            SpecialCommand::Delete("20240101_120000".to_string())
        );
        assert!(matches!(
            parse_special_command("/delete a b"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_parse_summarize() {
        assert_eq!(
            parse_special_command("/summarize").unwrap(),
            SpecialCommand::Summarize(SummaryKind::OneSentence)
        );
        assert_eq!(
            parse_special_command("/summarize kw").unwrap(),
            SpecialCommand::Summarize(SummaryKind::Keywords)
        );
        assert_eq!(
            parse_special_command("/summarize poem").unwrap_err(),
            CommandError::UnsupportedArgument {
                command: "/summarize".to_string(),
                arg: "poem".to_string()
            }
        );
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(
            parse_special_command("/theme").unwrap(),
            SpecialCommand::SwitchTheme(None)
        );
        assert_eq!(
            parse_special_command("/theme Light").unwrap(),
            SpecialCommand::SwitchTheme(Some(Theme::Light))
        );
        assert!(parse_special_command("/theme neon").is_err());
    }

    #[test]
    fn test_parse_unexpected_argument() {
        assert!(matches!(
            parse_special_command("/new now"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse_special_command("/frobnicate it").unwrap_err(),
            CommandError::UnknownCommand("/frobnicate".to_string())
        );
    }
}
