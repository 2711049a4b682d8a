//! The active chat session
//!
//! A `ChatSession` is the conversation the user is currently typing into.
//! It is owned by the chat controller and handed to the store explicitly;
//! there is no process-wide "current session".

use crate::providers::Message;
use crate::storage::SessionRecord;
use chrono::{DateTime, Local};

/// Format of session identifiers
pub const SESSION_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Build a session id from a local creation time
///
/// # Examples
///
/// ```
/// use chatvault::session::new_session_id;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
/// assert_eq!(new_session_id(at), "20240101_120000");
/// ```
pub fn new_session_id(at: DateTime<Local>) -> String {
    at.format(SESSION_ID_FORMAT).to_string()
}

/// First session id for `at` that `is_taken` does not report as in use
///
/// Tries the plain timestamp first, then `_2`, `_3` and so on.
///
/// # Examples
///
/// ```
/// use chatvault::session::unused_session_id;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
/// let id = unused_session_id(at, |id| id == "20240101_120000");
/// assert_eq!(id, "20240101_120000_2");
/// ```
pub fn unused_session_id(at: DateTime<Local>, is_taken: impl Fn(&str) -> bool) -> String {
    let base = new_session_id(at);
    if !is_taken(base.as_str()) {
        return base;
    }
    (2u32..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !is_taken(candidate.as_str()))
        .unwrap_or_else(|| base.clone())
}

/// In-memory conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    id: String,
    messages: Vec<Message>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Fresh empty session with an id taken from the current local time
    pub fn new() -> Self {
        Self::with_id(new_session_id(Local::now()))
    }

    /// Empty session with a given id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
        }
    }

    /// Session restored from a stored record
    pub fn from_record(record: SessionRecord) -> Self {
        Self {
            id: record.id,
            messages: record.messages,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a user turn
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant reply
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Drop all messages but keep the id
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Replace with a fresh empty session
    ///
    /// The new id never equals the current one, nor any id `is_taken`
    /// reports as in use.
    pub fn reset(&mut self, is_taken: impl Fn(&str) -> bool) {
        let current = std::mem::take(&mut self.id);
        let id = unused_session_id(Local::now(), |id| id == current || is_taken(id));
        *self = Self::with_id(id);
    }

    /// Transcript as `role: content` lines
    pub fn transcript_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Role;
    use chrono::TimeZone;

    #[test]
    fn test_new_session_id_format() {
        let at = Local.with_ymd_and_hms(2023, 12, 31, 23, 59, 58).unwrap();
        assert_eq!(new_session_id(at), "20231231_235958");
    }

    #[test]
    fn test_new_session_is_empty_with_timestamp_id() {
        let session = ChatSession::new();
        assert!(session.is_empty());
        assert_eq!(session.id().len(), 15);
        assert_eq!(session.id().as_bytes()[8], b'_');
    }

    #[test]
    fn test_push_keeps_order() {
        let mut session = ChatSession::with_id("a");
        session.push_user("hi");
        session.push_assistant("hello");
        assert_eq!(session.len(), 2);
        assert_eq!(session.messages()[0].role, Role::User);
        assert_eq!(session.messages()[1].role, Role::Assistant);
    }

    #[test]
    fn test_clear_keeps_id() {
        let mut session = ChatSession::with_id("keep-me");
        session.push_user("hi");
        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.id(), "keep-me");
    }

    #[test]
    fn test_reset_replaces_id_and_messages() {
        let mut session = ChatSession::with_id("old");
        session.push_user("hi");
        session.reset(|_| false);
        assert!(session.is_empty());
        assert_ne!(session.id(), "old");
    }

    #[test]
    fn test_reset_within_same_second_gets_new_id() {
        let mut session = ChatSession::new();
        let first = session.id().to_string();
        session.reset(|_| false);
        assert_ne!(session.id(), first);
    }

    #[test]
    fn test_unused_session_id_skips_taken() {
        let at = Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(unused_session_id(at, |_| false), "20240101_120000");
        let taken = ["20240101_120000", "20240101_120000_2"];
        assert_eq!(
            unused_session_id(at, |id| taken.contains(&id)),
            "20240101_120000_3"
        );
    }

    #[test]
    fn test_from_record() {
        let record = SessionRecord {
            id: "20240101_120000".to_string(),
            timestamp: "whenever".to_string(),
            messages: vec![Message::user("q"), Message::assistant("a")],
        };
        let session = ChatSession::from_record(record);
        assert_eq!(session.id(), "20240101_120000");
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_transcript_text() {
        let mut session = ChatSession::with_id("t");
        session.push_user("What is Rust?");
        session.push_assistant("A language.");
        assert_eq!(
            session.transcript_text(),
            "user: What is Rust?\nassistant: A language."
        );
    }

    #[test]
    fn test_transcript_text_empty() {
        assert_eq!(ChatSession::with_id("t").transcript_text(), "");
    }
}
