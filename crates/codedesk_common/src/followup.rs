//! "Show all" follow-ups.
//!
//! After an ambiguous answer the user can ask to see every listed code
//! ("show all", "all of them", ...). The codes come from the previous
//! assistant turn: its structured outcome when present, otherwise the
//! rendered ambiguity list is parsed (bulleted, backtick-quoted codes).

use crate::conversation::{Turn, TurnOutcome};
use regex::Regex;
use std::sync::OnceLock;

/// Heading that marks a rendered ambiguity list
pub const AMBIGUITY_HEADING: &str = "### Ambiguous Search Result";

/// Phrases recognized as a show-all request
pub const DEFAULT_SHOW_ALL_PHRASES: &[&str] = &["show all", "all options", "give all", "all of them"];

/// Bullet + backtick-quoted code: upper-case letters, digits and hyphens
const LISTED_CODE_PATTERN: &str = r"\* `([A-Z0-9-]+)`";

fn listed_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LISTED_CODE_PATTERN).expect("listed code pattern is valid"))
}

/// Recognizes show-all requests (case-insensitive, whole words)
#[derive(Debug, Clone)]
pub struct ShowAllDetector {
    /// `None` when no phrases are configured
    pattern: Option<Regex>,
}

impl ShowAllDetector {
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = phrases
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn is_show_all(&self, text: &str) -> bool {
        self.pattern
            .as_ref()
            .map(|p| p.is_match(text))
            .unwrap_or(false)
    }
}

/// Where the show-all lookback got its codes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Previous turn was not an ambiguity list; treat the text as a query
    NotApplicable,
    /// Codes to expand, in listing order, without duplicates
    Codes(Vec<String>),
    /// Previous turn was an ambiguity list but no codes could be recovered
    ExtractionFailed,
}

/// Whether rendered text is an ambiguity list
pub fn is_ambiguity_listing(text: &str) -> bool {
    text.contains(AMBIGUITY_HEADING)
}

/// Codes listed in a rendered ambiguity list, first appearance kept
pub fn extract_listed_codes(text: &str) -> Vec<String> {
    let found = listed_code_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    dedup_in_order(found)
}

/// Resolve which codes a show-all request refers to
pub fn show_all_codes(last_assistant: Option<&Turn>) -> FollowUp {
    let Some(turn) = last_assistant else {
        return FollowUp::NotApplicable;
    };

    let codes = match &turn.outcome {
        Some(TurnOutcome::Ambiguous { codes, .. }) => dedup_in_order(codes.iter().cloned()),
        Some(_) => return FollowUp::NotApplicable,
        None => {
            if !is_ambiguity_listing(&turn.text) {
                return FollowUp::NotApplicable;
            }
            extract_listed_codes(&turn.text)
        }
    };

    if codes.is_empty() {
        FollowUp::ExtractionFailed
    } else {
        FollowUp::Codes(codes)
    }
}

fn dedup_in_order(codes: impl Iterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for code in codes {
        if !unique.contains(&code) {
            unique.push(code);
        }
    }
    unique
}
