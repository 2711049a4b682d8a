//! Chat controller
//!
//! Owns the active session together with the provider and the store, and
//! implements the session lifecycle: an exchange appends the user turn,
//! asks the provider, appends the reply and writes the whole session
//! through to disk. A failed provider call keeps the user turn in memory and
//! leaves the stored record untouched.

use crate::error::{ChatvaultError, Result, StorageError};
use crate::prompts::{build_summary_messages, SummaryKind};
use crate::providers::{Provider, TokenUsage};
use crate::session::ChatSession;
use crate::storage::{SessionStore, StoredSession};

/// Outcome of a completed exchange
#[derive(Debug)]
pub struct Exchange {
    /// Assistant reply text
    pub reply: String,
    /// Token usage reported by the provider
    pub usage: Option<TokenUsage>,
    /// Set when the reply arrived but writing the session failed
    pub save_error: Option<StorageError>,
}

/// Interactive chat state
pub struct ChatController {
    provider: Box<dyn Provider>,
    store: SessionStore,
    session: ChatSession,
}

impl ChatController {
    /// Controller with a fresh empty session
    pub fn new(provider: Box<dyn Provider>, store: SessionStore) -> Self {
        Self::with_session(provider, store, ChatSession::new())
    }

    pub fn with_session(
        provider: Box<dyn Provider>,
        store: SessionStore,
        session: ChatSession,
    ) -> Self {
        Self {
            provider,
            store,
            session,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn model(&self) -> String {
        self.provider.model()
    }

    /// Run one exchange with the provider
    ///
    /// # Errors
    ///
    /// `EmptyPrompt` for blank input; any provider error is returned as is
    /// with the user turn kept in the session and nothing written.
    pub async fn send(&mut self, prompt: &str) -> Result<Exchange> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ChatvaultError::EmptyPrompt.into());
        }

        self.session.push_user(prompt);
        tracing::debug!(
            "Sending {} messages for session {}",
            self.session.len(),
            self.session.id()
        );

        let response = match self.provider.complete(self.session.messages()).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Exchange failed for session {}: {}", self.session.id(), e);
                return Err(e);
            }
        };

        let reply = response.message.content;
        self.session.push_assistant(reply.clone());

        let save_error = match self.store.save(self.session.id(), self.session.messages()) {
            Ok(_) => None,
            Err(e) => {
                tracing::error!("Failed to save session {}: {}", self.session.id(), e);
                Some(e)
            }
        };

        Ok(Exchange {
            reply,
            usage: response.usage,
            save_error,
        })
    }

    /// Summarize the active conversation without changing it
    pub async fn summarize(&self, kind: SummaryKind) -> Result<String> {
        summarize_session(self.provider.as_ref(), &self.session, kind).await
    }

    /// Start a new session, saving the current one first if it has messages
    ///
    /// Returns whether the previous session was written.
    pub fn new_session(&mut self) -> Result<bool> {
        let saved = self
            .store
            .save(self.session.id(), self.session.messages())
            .map_err(ChatvaultError::from)?;
        let previous = self.session.id().to_string();
        self.reset_session();
        tracing::info!("Started session {} (previous: {})", self.session.id(), previous);
        Ok(saved)
    }

    /// Drop the active messages but keep the session id
    pub fn clear(&mut self) {
        self.session.clear();
        tracing::info!("Cleared session {}", self.session.id());
    }

    /// Make a stored session active
    ///
    /// On failure the current session is left as it was.
    pub fn open(&mut self, id: &str) -> Result<()> {
        let record = self.store.load(id).map_err(ChatvaultError::from)?;
        self.session = ChatSession::from_record(record);
        tracing::info!(
            "Opened session {} ({} messages)",
            self.session.id(),
            self.session.len()
        );
        Ok(())
    }

    /// Delete a stored session; returns whether a record was removed
    ///
    /// Removing the active session's record also resets the active session.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let removed = self.store.delete(id).map_err(ChatvaultError::from)?;
        if removed && id == self.session.id() {
            self.reset_session();
            tracing::info!("Active session deleted, started {}", self.session.id());
        }
        Ok(removed)
    }

    fn reset_session(&mut self) {
        let store = &self.store;
        self.session.reset(|candidate| store.exists(candidate).unwrap_or(false));
    }

    /// Stored session ids, most recently modified first
    pub fn list_sessions(&self) -> Result<Vec<String>> {
        Ok(self.store.list().map_err(ChatvaultError::from)?)
    }

    /// Stored sessions with modification times
    pub fn entries(&self) -> Result<Vec<StoredSession>> {
        Ok(self.store.entries().map_err(ChatvaultError::from)?)
    }
}

/// Ask `provider` to summarize `session`
///
/// # Errors
///
/// `EmptyConversation` when the session has no messages.
pub async fn summarize_session(
    provider: &dyn Provider,
    session: &ChatSession,
    kind: SummaryKind,
) -> Result<String> {
    if session.is_empty() {
        return Err(ChatvaultError::EmptyConversation.into());
    }

    let messages = build_summary_messages(kind, &session.transcript_text());
    tracing::debug!("Requesting {} summary of session {}", kind, session.id());
    let response = provider.complete(&messages).await?;
    Ok(response.message.content)
}
