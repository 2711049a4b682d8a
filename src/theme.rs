//! Color themes for the interactive chat
//!
//! Terminals come with dark or light backgrounds; the theme picks role label
//! colors that stay readable on either one. The theme can be changed while a
//! chat is running with `/theme`.

use crate::providers::Role;
use colored::{ColoredString, Colorize};
use std::fmt;

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Bright colors for dark backgrounds
    #[default]
    Dark,

    /// Deep colors for light backgrounds
    Light,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => write!(f, "DARK"),
            Self::Light => write!(f, "LIGHT"),
        }
    }
}

impl Theme {
    /// Parse a theme from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use chatvault::theme::Theme;
    ///
    /// assert_eq!(Theme::parse_str("light").unwrap(), Theme::Light);
    /// assert!(Theme::parse_str("sepia").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("Unknown theme: {}. Must be dark or light", other)),
        }
    }

    /// The other theme
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Get a user-friendly description of this theme
    pub fn description(&self) -> &'static str {
        match self {
            Self::Dark => "Dark Mode",
            Self::Light => "Light Mode",
        }
    }

    /// Get a colored tag representation of this theme
    pub fn colored_tag(&self) -> String {
        match self {
            Self::Dark => format!("[{}]", "DARK".bright_white()),
            Self::Light => format!("[{}]", "LIGHT".blue()),
        }
    }

    /// Colored label printed before a message of the given role
    pub fn role_label(&self, role: Role) -> ColoredString {
        let label = role.as_str();
        match (self, role) {
            (Self::Dark, Role::User) => label.bright_cyan().bold(),
            (Self::Dark, Role::Assistant) => label.bright_green().bold(),
            (Self::Dark, Role::System) => label.bright_yellow().bold(),
            (Self::Light, Role::User) => label.blue().bold(),
            (Self::Light, Role::Assistant) => label.green().bold(),
            (Self::Light, Role::System) => label.magenta().bold(),
        }
    }

    /// Input prompt shown by the chat loop
    pub fn format_prompt(&self, session_id: &str) -> String {
        match self {
            Self::Dark => format!("{} >> ", session_id.bright_black()),
            Self::Light => format!("{} >> ", session_id.black()),
        }
    }
}
