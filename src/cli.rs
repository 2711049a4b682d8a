//! Command-line interface definition for Chatvault
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, stored history, and summaries.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chatvault - terminal chat client with saved sessions
///
/// Chat with a hosted language model; every completed exchange is saved as
/// a JSON file so conversations can be listed, resumed and summarized later.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatvault")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory holding saved sessions
    #[arg(long, global = true)]
    pub history_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Chatvault
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat
    Chat {
        /// Override the model from config
        #[arg(short, long)]
        model: Option<String>,

        /// Resume a saved session by id
        #[arg(short, long)]
        resume: Option<String>,

        /// Color theme: dark or light
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Inspect and manage saved sessions
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Summarize a saved session
    Summarize {
        /// Session id
        id: String,

        /// Summary kind: sentence, bullets or keywords
        #[arg(short, long, default_value = "sentence")]
        kind: String,
    },
}

/// Saved session subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List saved sessions, most recently modified first
    List,

    /// Print the transcript of a saved session
    Show {
        /// Session id
        id: String,

        /// Print the raw JSON record instead of the transcript
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved session
    Delete {
        /// Session id
        id: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
