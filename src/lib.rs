//! Chatvault - terminal chat client library with saved sessions
//!
//! This library provides a file-backed session store, a completion provider
//! abstraction with an OpenRouter implementation, and the chat controller
//! that ties them together.
//!
//! # Architecture
//!
//! - `storage`: Session store, one JSON record per session
//! - `session`: The active in-memory conversation
//! - `chat`: Exchange orchestration and session lifecycle
//! - `providers`: Completion provider abstraction and OpenRouter client
//! - `prompts`: Summary prompts
//! - `theme`: Terminal color themes
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`, `commands`: Command-line interface and handlers
//!
//! # Example
//!
//! ```no_run
//! use chatvault::providers::Message;
//! use chatvault::storage::SessionStore;
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = SessionStore::new("chat_history")?;
//!     store.save("20240101_120000", &[Message::user("hi"), Message::assistant("hello")])?;
//!     for id in store.list()? {
//!         println!("{}", id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod storage;
pub mod theme;

// Re-export commonly used types
pub use chat::ChatController;
pub use config::Config;
pub use error::{ChatvaultError, Result, StorageError};
pub use session::ChatSession;
pub use storage::SessionStore;
pub use theme::Theme;

#[cfg(test)]
pub mod test_utils;
