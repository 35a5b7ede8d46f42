//! Conversation transcript.
//!
//! Caller-owned, append-only log of user and assistant turns. The lookup
//! code only ever reads the most recent assistant turn (show-all lookback).
//! Assistant turns may carry the structured outcome they rendered, so the
//! lookback does not have to re-parse Markdown.

use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Structured summary of what an assistant turn presented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnOutcome {
    NoMatch,
    Single { code: String },
    /// Codes in the order they were listed to the user
    Ambiguous { score: u8, codes: Vec<String> },
    ShowAll { codes: Vec<String> },
    ExtractionFailed,
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TurnOutcome>,
}

/// Append-only conversation log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::User,
            text: text.into(),
            outcome: None,
        });
    }

    /// Append an assistant turn; `outcome` is `None` for plain messages
    /// (welcome text, or text from a renderer without structured results)
    pub fn push_assistant(&mut self, text: impl Into<String>, outcome: Option<TurnOutcome>) {
        self.turns.push(Turn {
            role: Role::Assistant,
            text: text.into(),
            outcome,
        });
    }

    /// Most recent assistant turn, if any
    pub fn last_assistant(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == Role::Assistant)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_assistant_skips_user_turns() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("Welcome", None);
        transcript.push_user("color");
        transcript.push_assistant(
            "### Ambiguous Search Result",
            Some(TurnOutcome::Ambiguous {
                score: 95,
                codes: vec!["AB-100".to_string()],
            }),
        );
        transcript.push_user("show all");

        let last = transcript.last_assistant().unwrap();
        assert_eq!(last.text, "### Ambiguous Search Result");
        assert!(matches!(last.outcome, Some(TurnOutcome::Ambiguous { .. })));
        assert_eq!(transcript.len(), 4);
    }

    #[test]
    fn test_empty_transcript() {
        let mut transcript = Transcript::new();
        assert!(transcript.last_assistant().is_none());
        transcript.push_user("hello");
        assert!(transcript.last_assistant().is_none());
        assert!(!transcript.is_empty());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
