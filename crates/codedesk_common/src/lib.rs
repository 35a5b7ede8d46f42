//! Codedesk Common - fuzzy code lookup over a tabular knowledge base.
//!
//! Scores every unique code and its setting name against a free-text query,
//! resolves ties into a single answer or an ambiguity list, and expands an
//! ambiguity list on a "show all" follow-up.

pub mod config;
pub mod conversation;
pub mod dataset;
pub mod desk;
pub mod dialogue;
pub mod error;
pub mod followup;
pub mod greeting;
pub mod index;
pub mod lookup;
pub mod render;
pub mod resolver;
pub mod selector;
pub mod similarity;

pub use config::DeskConfig;
pub use conversation::{Role, Transcript, Turn, TurnOutcome};
pub use dataset::{load_csv, load_dataset, load_workbook, read_records, DetailColumn, Record, Schema};
pub use desk::{Desk, Reply};
pub use dialogue::{PhraseChooser, RandomChooser, SeededChooser};
pub use error::DatasetError;
pub use index::{CandidateIndex, CodeGroup, IndexStats, NamePolicy};
pub use lookup::{Lookup, LookupOutcome};
pub use resolver::{MatchPolicy, MatchResult};
pub use selector::{CandidateScore, Selection};
