//! Disambiguation resolver.
//!
//! Turns a `Selection` into a `MatchResult`: nothing, one confirmed code
//! with its rows, or a tied set the user has to narrow down.

use crate::index::{CandidateIndex, CodeGroup};
use crate::selector::Selection;
use crate::similarity::PERFECT_SCORE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Default minimum score for a usable match
pub const DEFAULT_MIN_MATCH_SCORE: u8 = 75;

/// Matching strictness and tie handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Scores below this never match (0-100)
    pub min_match_score: u8,
    /// Treat a tie at 100 as a match on the first code scanned
    pub exact_match_shortcut: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            min_match_score: DEFAULT_MIN_MATCH_SCORE,
            exact_match_shortcut: false,
        }
    }
}

/// Outcome of one lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    SingleMatch {
        code: String,
        score: u8,
        group: CodeGroup,
    },
    /// Several codes tied; detail rows are fetched only on follow-up
    Ambiguous { score: u8, codes: Vec<String> },
}

impl MatchResult {
    /// Codes in the order the ambiguity list presents them: unique, sorted
    pub fn listed_codes(codes: &[String]) -> Vec<String> {
        codes
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, MatchResult::NoMatch)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MatchResult::NoMatch => "no_match",
            MatchResult::SingleMatch { .. } => "single_match",
            MatchResult::Ambiguous { .. } => "ambiguous",
        }
    }

    pub fn score(&self) -> Option<u8> {
        match self {
            MatchResult::NoMatch => None,
            MatchResult::SingleMatch { score, .. } | MatchResult::Ambiguous { score, .. } => {
                Some(*score)
            }
        }
    }
}

/// Decide between no match, a single match and an ambiguous set
pub fn resolve(selection: &Selection, index: &CandidateIndex, policy: &MatchPolicy) -> MatchResult {
    let chosen = match selection.tied_codes.as_slice() {
        [] => return MatchResult::NoMatch,
        [only] => only,
        [first, ..] if policy.exact_match_shortcut && selection.best_score == PERFECT_SCORE => {
            debug!(
                "{} codes tied at 100, exact-match shortcut picks '{}'",
                selection.tied_codes.len(),
                first
            );
            first
        }
        codes => {
            return MatchResult::Ambiguous {
                score: selection.best_score,
                codes: codes.to_vec(),
            }
        }
    };

    let group = index.group(chosen);
    if group.is_empty() {
        // Selected code without rows counts as no match
        debug!("Selected code '{}' has no rows", chosen);
        return MatchResult::NoMatch;
    }

    MatchResult::SingleMatch {
        code: chosen.clone(),
        score: selection.best_score,
        group,
    }
}
