//! Conversation turn composition.
//!
//! `Desk` is what a front-end talks to: it takes a raw prompt, answers any
//! greeting, runs the lookup (with show-all lookback) and wraps the rendered
//! result in the right lead-in sentence.

use crate::config::DeskConfig;
use crate::conversation::{Transcript, TurnOutcome};
use crate::dataset::Schema;
use crate::dialogue::{
    with_label, PhraseChooser, CLARITY_CONNECTOR, EXTRACTION_FAILED, MATCH_CONNECTORS, NOT_FOUND,
    READY_TO_SEARCH, SHOW_ALL_LEAD, SPECIALIZED_TOOL, WELCOME,
};
use crate::followup::ShowAllDetector;
use crate::greeting::split_greeting;
use crate::index::CandidateIndex;
use crate::lookup::{Lookup, LookupOutcome};
use crate::selector::CandidateScore;
use crate::render::{render_ambiguity, render_code_details, render_show_all};
use crate::resolver::MatchResult;

/// One assistant answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Markdown shown to the user
    pub text: String,
    pub outcome: LookupOutcome,
    /// Greeting found at the start of the prompt
    pub greeting: Option<String>,
}

impl Reply {
    /// Structured outcome to store on the assistant turn
    pub fn turn_outcome(&self) -> TurnOutcome {
        match &self.outcome {
            LookupOutcome::Match(MatchResult::NoMatch) => TurnOutcome::NoMatch,
            LookupOutcome::Match(MatchResult::SingleMatch { code, .. }) => {
                TurnOutcome::Single { code: code.clone() }
            }
            LookupOutcome::Match(MatchResult::Ambiguous { score, codes }) => TurnOutcome::Ambiguous {
                score: *score,
                codes: MatchResult::listed_codes(codes),
            },
            LookupOutcome::ShowAll(_) => TurnOutcome::ShowAll {
                codes: self.outcome.codes(),
            },
            LookupOutcome::ExtractionFailed => TurnOutcome::ExtractionFailed,
        }
    }
}

/// Answers prompts against one loaded knowledge base
#[derive(Debug, Clone)]
pub struct Desk {
    lookup: Lookup,
    schema: Schema,
    greetings: Vec<String>,
    greeting_responses: Vec<String>,
}

impl Desk {
    pub fn new(index: CandidateIndex, schema: Schema, config: &DeskConfig) -> Result<Self, regex::Error> {
        let detector = ShowAllDetector::new(&config.conversation.show_all_phrases)?;
        Ok(Self {
            lookup: Lookup::new(index, config.matching.policy(), detector),
            schema,
            greetings: config.conversation.greetings.clone(),
            greeting_responses: config.conversation.greeting_responses.clone(),
        })
    }

    pub fn lookup(&self) -> &Lookup {
        &self.lookup
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Opening assistant message
    pub fn welcome(&self) -> String {
        with_label(WELCOME, &self.schema.code_label)
    }

    /// Top candidates for the query part of a prompt, as `respond` scores it
    pub fn explain(&self, prompt: &str, limit: usize) -> Vec<CandidateScore> {
        let split = split_greeting(prompt, &self.greetings);
        self.lookup.explain(split.query.trim(), limit)
    }

    /// Answer one prompt. Only the last assistant turn of `transcript` is read.
    pub fn respond(
        &self,
        prompt: &str,
        transcript: &Transcript,
        chooser: &mut dyn PhraseChooser,
    ) -> Reply {
        let split = split_greeting(prompt, &self.greetings);
        let query = split.query.trim();
        let label = self.schema.code_label.as_str();

        let outcome = if query.is_empty() {
            LookupOutcome::Match(MatchResult::NoMatch)
        } else {
            self.lookup.answer(query, transcript)
        };

        let body = match &outcome {
            LookupOutcome::Match(MatchResult::SingleMatch { group, .. }) => {
                let connector = chooser.choose(MATCH_CONNECTORS);
                format!(
                    "{}\n\n{}",
                    with_label(connector, label),
                    render_code_details(group, &self.schema)
                )
            }
            LookupOutcome::Match(MatchResult::Ambiguous { score, codes }) => format!(
                "{}\n\n{}",
                CLARITY_CONNECTOR,
                render_ambiguity(*score, codes, &self.schema)
            ),
            LookupOutcome::ShowAll(groups) => format!(
                "{}\n\n{}",
                with_label(SHOW_ALL_LEAD, label),
                render_show_all(groups, &self.schema)
            ),
            LookupOutcome::ExtractionFailed => EXTRACTION_FAILED.to_string(),
            LookupOutcome::Match(MatchResult::NoMatch) => {
                let message = if split.is_greeting() && !split.stripped {
                    READY_TO_SEARCH
                } else if query.is_empty() {
                    SPECIALIZED_TOOL
                } else {
                    NOT_FOUND
                };
                with_label(message, label)
            }
        };

        let text = if split.is_greeting() {
            let responses: Vec<&str> = self.greeting_responses.iter().map(String::as_str).collect();
            let hello = chooser.choose(&responses);
            if hello.is_empty() {
                body
            } else {
                format!("{} {}", hello, body)
            }
        } else {
            body
        };

        Reply {
            text,
            outcome,
            greeting: split.greeting,
        }
    }
}
