//! Summary prompts
//!
//! The chat can condense the active conversation three ways. Each kind maps
//! to a fixed system prompt; the conversation itself is sent as a single
//! user message so the provider sees it as material to summarize rather than
//! turns to continue.

use crate::providers::Message;
use std::fmt;

/// Prefix of the user message carrying the transcript
pub const TRANSCRIPT_PREAMBLE: &str = "Here is the conversation:\n\n";

/// How a conversation should be summarized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryKind {
    /// One concise sentence
    #[default]
    OneSentence,
    /// Exactly three bullet points
    ThreeBullets,
    /// Top five keywords, comma separated
    Keywords,
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneSentence => write!(f, "sentence"),
            Self::ThreeBullets => write!(f, "bullets"),
            Self::Keywords => write!(f, "keywords"),
        }
    }
}

impl SummaryKind {
    /// Parse a summary kind
    ///
    /// # Examples
    ///
    /// ```
    /// use chatvault::prompts::SummaryKind;
    ///
    /// assert_eq!(SummaryKind::parse_str("3").unwrap(), SummaryKind::ThreeBullets);
    /// assert_eq!(SummaryKind::parse_str("kw").unwrap(), SummaryKind::Keywords);
    /// assert!(SummaryKind::parse_str("essay").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "sentence" | "one" | "1" => Ok(Self::OneSentence),
            "bullets" | "3" => Ok(Self::ThreeBullets),
            "keywords" | "kw" => Ok(Self::Keywords),
            other => Err(format!(
                "Unknown summary kind: {}. Must be sentence, bullets or keywords",
                other
            )),
        }
    }

    /// Label shown above the summary
    pub fn title(&self) -> &'static str {
        match self {
            Self::OneSentence => "Summary (1 sentence)",
            Self::ThreeBullets => "Summary (3 bullet points)",
            Self::Keywords => "Keywords",
        }
    }

    /// System prompt instructing the model
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::OneSentence => {
                "Summarize the following conversation in a single concise sentence."
            }
            Self::ThreeBullets => {
                "Summarize the key points of the following conversation in exactly 3 bullet points."
            }
            Self::Keywords => {
                "Extract the top 5 most important keywords or topics from the conversation, separated by commas."
            }
        }
    }
}

/// Messages sent to the provider to summarize `transcript`
pub fn build_summary_messages(kind: SummaryKind, transcript: &str) -> Vec<Message> {
    vec![
        Message::system(kind.system_prompt()),
        Message::user(format!("{}{}", TRANSCRIPT_PREAMBLE, transcript)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Role;

    #[test]
    fn test_parse_aliases() {
        for s in ["sentence", "one", "1", " Sentence "] {
            assert_eq!(SummaryKind::parse_str(s).unwrap(), SummaryKind::OneSentence);
        }
        for s in ["bullets", "3", "BULLETS"] {
            assert_eq!(SummaryKind::parse_str(s).unwrap(), SummaryKind::ThreeBullets);
        }
        for s in ["keywords", "kw"] {
            assert_eq!(SummaryKind::parse_str(s).unwrap(), SummaryKind::Keywords);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = SummaryKind::parse_str("haiku").unwrap_err();
        assert!(err.contains("haiku"));
    }

    #[test]
    fn test_display_parses_back() {
        for kind in [
            SummaryKind::OneSentence,
            SummaryKind::ThreeBullets,
            SummaryKind::Keywords,
        ] {
            assert_eq!(SummaryKind::parse_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn test_system_prompts() {
        assert!(SummaryKind::OneSentence
            .system_prompt()
            .contains("single concise sentence"));
        assert!(SummaryKind::ThreeBullets
            .system_prompt()
            .contains("exactly 3 bullet points"));
        assert!(SummaryKind::Keywords
            .system_prompt()
            .contains("top 5 most important keywords"));
    }

    #[test]
    fn test_build_summary_messages() {
        let messages = build_summary_messages(SummaryKind::Keywords, "user: hi\nassistant: hello");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(
            messages[1].content,
            "Here is the conversation:\n\nuser: hi\nassistant: hello"
        );
    }
}
