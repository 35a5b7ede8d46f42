//! Lookup engine.
//!
//! Ties the matcher together: score every unique code, resolve ties, and
//! handle show-all follow-ups against the previous assistant turn.
//! Every condition comes back as a value; nothing here fails.

use crate::conversation::Transcript;
use crate::followup::{show_all_codes, FollowUp, ShowAllDetector};
use crate::index::{CandidateIndex, CodeGroup};
use crate::resolver::{resolve, MatchPolicy, MatchResult};
use crate::selector::{score_candidates, select, CandidateScore};
use tracing::{debug, info};

/// Result of answering one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Fresh lookup
    Match(MatchResult),
    /// Show-all expansion, in listing order
    ShowAll(Vec<CodeGroup>),
    /// Show-all asked for, but the listed codes could not be recovered
    ExtractionFailed,
}

impl LookupOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            LookupOutcome::Match(result) => result.kind(),
            LookupOutcome::ShowAll(_) => "show_all",
            LookupOutcome::ExtractionFailed => "extraction_failed",
        }
    }

    /// Codes the answer presents
    pub fn codes(&self) -> Vec<String> {
        match self {
            LookupOutcome::Match(MatchResult::NoMatch) | LookupOutcome::ExtractionFailed => vec![],
            LookupOutcome::Match(MatchResult::SingleMatch { code, .. }) => vec![code.clone()],
            LookupOutcome::Match(MatchResult::Ambiguous { codes, .. }) => {
                MatchResult::listed_codes(codes)
            }
            LookupOutcome::ShowAll(groups) => groups.iter().map(|g| g.code.clone()).collect(),
        }
    }

    pub fn score(&self) -> Option<u8> {
        match self {
            LookupOutcome::Match(result) => result.score(),
            _ => None,
        }
    }
}

impl From<MatchResult> for LookupOutcome {
    fn from(result: MatchResult) -> Self {
        LookupOutcome::Match(result)
    }
}

/// Fuzzy lookup over a loaded index
#[derive(Debug, Clone)]
pub struct Lookup {
    index: CandidateIndex,
    policy: MatchPolicy,
    show_all: ShowAllDetector,
}

impl Lookup {
    pub fn new(index: CandidateIndex, policy: MatchPolicy, show_all: ShowAllDetector) -> Self {
        Self {
            index,
            policy,
            show_all,
        }
    }

    pub fn index(&self) -> &CandidateIndex {
        &self.index
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Fresh lookup, no history involved
    pub fn find(&self, query: &str) -> MatchResult {
        let selection = select(query, &self.index, self.policy.min_match_score);
        let result = resolve(&selection, &self.index, &self.policy);
        debug!("Query '{}' resolved to {}", query, result.kind());
        result
    }

    /// Answer a query, looking back one assistant turn for show-all requests
    pub fn answer(&self, query: &str, transcript: &Transcript) -> LookupOutcome {
        if self.show_all.is_show_all(query) {
            match show_all_codes(transcript.last_assistant()) {
                FollowUp::Codes(codes) => return self.expand(&codes),
                FollowUp::ExtractionFailed => {
                    info!("Show-all requested but no codes recovered from the previous turn");
                    return LookupOutcome::ExtractionFailed;
                }
                FollowUp::NotApplicable => {
                    debug!("Show-all phrase without a preceding ambiguity list, searching instead");
                }
            }
        }

        LookupOutcome::Match(self.find(query))
    }

    /// Details for each code in order; codes without rows are skipped
    pub fn expand(&self, codes: &[String]) -> LookupOutcome {
        let groups: Vec<CodeGroup> = codes
            .iter()
            .map(|code| self.index.group(code))
            .filter(|group| !group.is_empty())
            .collect();

        if groups.is_empty() {
            debug!("None of {} listed codes has rows", codes.len());
            return LookupOutcome::Match(MatchResult::NoMatch);
        }
        LookupOutcome::ShowAll(groups)
    }

    /// Top `limit` candidates with their scores
    pub fn explain(&self, query: &str, limit: usize) -> Vec<CandidateScore> {
        let mut scores = score_candidates(query, &self.index);
        scores.truncate(limit);
        scores
    }
}
