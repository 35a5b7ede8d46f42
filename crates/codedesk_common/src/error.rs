//! Error types for Codedesk.
//!
//! Only dataset loading can fail. Matching outcomes (no match, ambiguity,
//! failed show-all extraction) are values, see `lookup::LookupOutcome`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Dataset file {} could not be read: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Code '{code}' has divergent names: '{first}' and '{other}'")]
    DivergentName {
        code: String,
        first: String,
        other: String,
    },
}

impl DatasetError {
    /// Short machine-readable kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            DatasetError::NotFound(_) => "not_found",
            DatasetError::Unreadable { .. } => "unreadable",
            DatasetError::MissingColumns(_) => "missing_columns",
            DatasetError::DivergentName { .. } => "divergent_name",
        }
    }
}
