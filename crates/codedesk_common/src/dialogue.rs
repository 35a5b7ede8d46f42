//! Dialogue phrases and phrase choice.
//!
//! Canned sentences used around rendered answers. Where several phrasings
//! exist, a `PhraseChooser` picks one; production uses `RandomChooser`,
//! tests use `SeededChooser` for stable output.

use rand::seq::SliceRandom;

/// Lead-ins for a single confirmed answer ({label} is the code label)
pub const MATCH_CONNECTORS: &[&str] = &[
    "I've checked my knowledge base, and here are the details for that {label}:",
    "I found a close match! Here is the information you requested:",
    "Certainly! You can find the full mapping details below:",
];

/// Lead-in for an ambiguity list
pub const CLARITY_CONNECTOR: &str = "I need a little more clarity.";

/// Lead-in for a show-all expansion
pub const SHOW_ALL_LEAD: &str = "Displaying details for all the highly-matched {label}s below:";

/// No usable match for a real query
pub const NOT_FOUND: &str = "I couldn't find a close match for that {label} or query in my knowledge base. Could you try rephrasing or check the exact code or setting name?";

/// Greeting without a query
pub const READY_TO_SEARCH: &str = "I'm ready to search my knowledge base. What {label} or setting name can I look up for you?";

/// Nothing searchable at all
pub const SPECIALIZED_TOOL: &str = "I'm a specialized tool. I couldn't find an answer for that general topic. Try asking about a specific {label} or Setting Name!";

/// Show-all asked for, but the previous list could not be read back
pub const EXTRACTION_FAILED: &str = "I couldn't identify the codes from the previous context. Please try searching for a single code name.";

/// First assistant turn of a session
pub const WELCOME: &str = "Hello! I can search my knowledge base for specific {label} mappings by code or setting name.";

/// Fill in the code label
pub fn with_label(template: &str, label: &str) -> String {
    template.replace("{label}", label)
}

/// Picks one phrasing out of several
pub trait PhraseChooser {
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str;
}

/// Uniformly random choice
#[derive(Debug, Default)]
pub struct RandomChooser;

impl PhraseChooser for RandomChooser {
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("")
    }
}

/// Deterministic rotation starting at `seed`
#[derive(Debug, Clone, Default)]
pub struct SeededChooser {
    seed: u64,
}

impl SeededChooser {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PhraseChooser for SeededChooser {
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str {
        if options.is_empty() {
            return "";
        }
        let picked = options[(self.seed as usize) % options.len()];
        self.seed = self.seed.wrapping_add(1);
        picked
    }
}
