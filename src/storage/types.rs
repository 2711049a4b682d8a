use crate::providers::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-disk session document
///
/// One of these lives in `<id>.json`. `timestamp` is informational; listing
/// order comes from the file's modification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session identifier (also the file stem)
    #[serde(default)]
    pub id: String,
    /// Human-readable time of the last save
    #[serde(default)]
    pub timestamp: String,
    /// Transcript in conversation order
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Listing entry for a stored session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Session identifier
    pub id: String,
    /// Last-modified time of the record file
    pub modified: DateTime<Utc>,
}
