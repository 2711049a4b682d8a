//! Test utilities for Chatvault
//!
//! Temporary session stores and a scripted provider that answers from a
//! queue instead of the network.

use crate::error::{ChatvaultError, Result};
use crate::providers::{CompletionResponse, Message, Provider};
use crate::storage::SessionStore;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a session store inside a fresh temporary directory
///
/// The `TempDir` is returned so the caller keeps the directory alive.
pub fn temp_store() -> (SessionStore, TempDir) {
    let dir = temp_dir();
    let store = SessionStore::new(dir.path().join("chat_history"))
        .expect("Failed to create session store");
    (store, dir)
}

/// Scripted reply for [`FakeProvider`]
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// Answer with this assistant text
    Text(String),
    /// Fail with a provider error carrying this message
    Fail(String),
}

/// Provider that pops replies from a queue and records every request
#[derive(Debug, Clone, Default)]
pub struct FakeProvider {
    replies: Arc<Mutex<VecDeque<FakeReply>>>,
    requests: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl FakeProvider {
    pub fn new(replies: impl IntoIterator<Item = FakeReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            requests: Arc::default(),
        }
    }

    /// Provider answering each request with the given texts in order
    pub fn answering(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| FakeReply::Text(t.to_string())))
    }

    /// Message lists received so far
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl Provider for FakeProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(messages.to_vec());

        let reply = self.replies.lock().expect("replies lock").pop_front();
        match reply {
            Some(FakeReply::Text(text)) => Ok(CompletionResponse::new(Message::assistant(text))),
            Some(FakeReply::Fail(reason)) => Err(ChatvaultError::Provider(reason).into()),
            None => Err(ChatvaultError::Provider("no scripted reply left".to_string()).into()),
        }
    }

    fn model(&self) -> String {
        "fake/model".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_provider_replays_queue() {
        let provider = FakeProvider::new([
            FakeReply::Text("one".to_string()),
            FakeReply::Fail("boom".to_string()),
        ]);

        let first = provider.complete(&[Message::user("a")]).await.unwrap();
        assert_eq!(first.message.content, "one");
        assert!(provider.complete(&[Message::user("b")]).await.is_err());
        assert!(provider.complete(&[Message::user("c")]).await.is_err());
        assert_eq!(provider.requests().len(), 3);
    }

    #[test]
    fn test_temp_store_is_empty() {
        let (store, _dir) = temp_store();
        assert!(store.list().unwrap().is_empty());
    }
}
