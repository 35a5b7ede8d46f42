//! Match selector.
//!
//! Scores every unique code against the query (on both the code and its
//! name) and keeps the codes that reach the best score seen so far.
//!
//! The scan is order-sensitive on purpose:
//! - a strictly better score resets the tied set, dropping earlier ties;
//! - an equal score only joins the tied set when it clears `min_score`.
//!
//! A best score under `min_score` yields an empty selection.

use crate::index::CandidateIndex;
use crate::similarity::token_set_ratio;
use serde::Serialize;
use tracing::{debug, trace};

/// Best score and the codes that reached it, in scan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub best_score: u8,
    pub tied_codes: Vec<String>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tied_codes.is_empty()
    }
}

/// Per-code scores, for `--explain` style diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateScore {
    pub code: String,
    pub name: String,
    pub code_score: u8,
    pub name_score: u8,
}

impl CandidateScore {
    pub fn best(&self) -> u8 {
        self.code_score.max(self.name_score)
    }
}

fn score_code(query: &str, index: &CandidateIndex, code: &str) -> CandidateScore {
    let name = index.name_of(code);
    CandidateScore {
        code: code.to_string(),
        name: name.to_string(),
        code_score: token_set_ratio(query, code),
        name_score: token_set_ratio(query, name),
    }
}

/// Select the best-scoring codes for a query
pub fn select(query: &str, index: &CandidateIndex, min_score: u8) -> Selection {
    let mut best_score = 0u8;
    let mut tied_codes: Vec<String> = Vec::new();

    for code in index.unique_codes() {
        let scored = score_code(query, index, code);
        let current = scored.best();
        trace!(
            "{}: code_score={} name_score={} -> {}",
            code,
            scored.code_score,
            scored.name_score,
            current
        );

        if current > best_score {
            best_score = current;
            tied_codes = vec![code.clone()];
        } else if current == best_score && current >= min_score && !tied_codes.contains(code) {
            tied_codes.push(code.clone());
        }
    }

    if best_score < min_score || tied_codes.is_empty() {
        debug!(
            "No match for '{}' (best {} < min {})",
            query, best_score, min_score
        );
        return Selection::none();
    }

    debug!(
        "Best score {} for '{}' shared by {} code(s)",
        best_score,
        query,
        tied_codes.len()
    );
    Selection {
        best_score,
        tied_codes,
    }
}

/// Score every code, best first (ties keep index order)
pub fn score_candidates(query: &str, index: &CandidateIndex) -> Vec<CandidateScore> {
    let mut scores: Vec<CandidateScore> = index
        .unique_codes()
        .iter()
        .map(|code| score_code(query, index, code))
        .collect();
    // Stable sort keeps first-seen order among equal scores
    scores.sort_by(|a, b| b.best().cmp(&a.best()));
    scores
}
