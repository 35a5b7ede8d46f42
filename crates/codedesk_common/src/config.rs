//! Codedesk configuration.
//!
//! Config file: ~/.config/codedesk/config.toml or /etc/codedesk/config.toml
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration for the stock "08 Code" knowledge base.

use crate::dataset::{delimiter_byte, Schema};
use crate::followup::DEFAULT_SHOW_ALL_PHRASES;
use crate::greeting::{DEFAULT_GREETINGS, DEFAULT_GREETING_RESPONSES};
use crate::index::NamePolicy;
use crate::resolver::{MatchPolicy, DEFAULT_MIN_MATCH_SCORE};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Env var naming the dataset file
pub const ENV_DATASET: &str = "CODEDESK_DATASET";
/// Env var overriding the minimum match score
pub const ENV_MIN_SCORE: &str = "CODEDESK_MIN_SCORE";

/// Where the knowledge base lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Delimited text file (CSV unless `delimiter` says otherwise), or a
    /// spreadsheet workbook when the extension is .xlsx, .xls and the like
    pub path: PathBuf,
    /// Ignored for workbooks
    pub delimiter: char,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("knowledge_base.csv"),
            delimiter: ',',
        }
    }
}

/// Matching strictness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub min_match_score: u8,
    /// A tie at 100 resolves to the first code instead of asking
    pub exact_match_shortcut: bool,
    /// Reject datasets where one code carries several names
    pub strict_names: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_match_score: DEFAULT_MIN_MATCH_SCORE,
            exact_match_shortcut: false,
            strict_names: false,
        }
    }
}

impl MatchingConfig {
    pub fn policy(&self) -> MatchPolicy {
        MatchPolicy {
            min_match_score: self.min_match_score,
            exact_match_shortcut: self.exact_match_shortcut,
        }
    }

    pub fn name_policy(&self) -> NamePolicy {
        if self.strict_names {
            NamePolicy::Strict
        } else {
            NamePolicy::FirstWins
        }
    }
}

/// Conversational phrasing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    pub show_all_phrases: Vec<String>,
    pub greetings: Vec<String>,
    pub greeting_responses: Vec<String>,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            show_all_phrases: owned(DEFAULT_SHOW_ALL_PHRASES),
            greetings: owned(DEFAULT_GREETINGS),
            greeting_responses: owned(DEFAULT_GREETING_RESPONSES),
        }
    }
}

/// Query audit log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Append one JSON line per answered query
    pub query_log: bool,
}

/// Main Codedesk configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub dataset: DatasetConfig,
    pub schema: Schema,
    pub matching: MatchingConfig,
    pub conversation: ConversationConfig,
    pub log: LogConfig,
}

impl DeskConfig {
    /// Default user config path: $XDG_CONFIG_HOME/codedesk/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("codedesk").join("config.toml"))
    }

    /// System config path: /etc/codedesk/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/codedesk/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. User config
    /// 2. System config
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::load_from(&system_path);
        }

        Ok(Self::default())
    }

    /// Load a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: DeskConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Apply CODEDESK_* environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment in production)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = lookup(ENV_DATASET).filter(|p| !p.trim().is_empty()) {
            self.dataset.path = PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup(ENV_MIN_SCORE) {
            self.matching.min_match_score = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: '{}'", ENV_MIN_SCORE, raw))?;
        }

        Ok(())
    }

    /// Reject settings the lookup cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.matching.min_match_score > 100 {
            bail!(
                "min_match_score must be between 0 and 100, got {}",
                self.matching.min_match_score
            );
        }
        if self.schema.code_column.trim().is_empty() {
            bail!("schema.code_column must not be empty");
        }
        if self.schema.name_column.trim().is_empty() {
            bail!("schema.name_column must not be empty");
        }
        if self.conversation.show_all_phrases.iter().all(|p| p.trim().is_empty()) {
            bail!("conversation.show_all_phrases needs at least one phrase");
        }
        if self.delimiter().is_none() {
            bail!(
                "dataset.delimiter must be an ASCII character, got '{}'",
                self.dataset.delimiter
            );
        }
        Ok(())
    }

    /// Dataset delimiter as a byte, if it is ASCII
    pub fn delimiter(&self) -> Option<u8> {
        delimiter_byte(self.dataset.delimiter)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = DeskConfig::default();
        assert_eq!(config.matching.min_match_score, 75);
        assert!(!config.matching.exact_match_shortcut);
        assert_eq!(config.dataset.delimiter, ',');
        assert_eq!(config.conversation.show_all_phrases.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = DeskConfig::from_toml_str("").unwrap();
        assert_eq!(config, DeskConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = DeskConfig::from_toml_str(
            r#"
[dataset]
path = "/srv/kb/settings.tsv"
delimiter = "\t"

[matching]
min_match_score = 85
exact_match_shortcut = true

[schema]
code_column = "Code"
name_column = "Title"
details = [{ column = "Description", label = "Description" }]
"#,
        )
        .unwrap();

        assert_eq!(config.dataset.path, PathBuf::from("/srv/kb/settings.tsv"));
        assert_eq!(config.delimiter(), Some(b'\t'));
        assert_eq!(config.matching.min_match_score, 85);
        assert!(config.matching.policy().exact_match_shortcut);
        assert_eq!(config.schema.code_column, "Code");
        // Unset schema fields keep their defaults
        assert_eq!(config.schema.code_label, "08 Code");
        assert_eq!(config.schema.details.len(), 1);
    }

    #[test]
    fn test_validate_rejects_score_over_100() {
        let mut config = DeskConfig::default();
        config.matching.min_match_score = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_no_show_all_phrases() {
        let mut config = DeskConfig::default();
        config.conversation.show_all_phrases = vec!["  ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_ascii_delimiter() {
        let mut config = DeskConfig::default();
        config.dataset.delimiter = '§';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> =
            [(ENV_DATASET, "/tmp/kb.csv"), (ENV_MIN_SCORE, " 90 ")].into_iter().collect();
        let mut config = DeskConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("/tmp/kb.csv"));
        assert_eq!(config.matching.min_match_score, 90);
    }

    #[test]
    fn test_invalid_score_override() {
        let mut config = DeskConfig::default();
        let result = config.apply_overrides(|key| {
            (key == ENV_MIN_SCORE).then(|| "lots".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_name_policy() {
        let mut matching = MatchingConfig::default();
        assert_eq!(matching.name_policy(), NamePolicy::FirstWins);
        matching.strict_names = true;
        assert_eq!(matching.name_policy(), NamePolicy::Strict);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DeskConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("min_match_score = 75"));
        assert_eq!(DeskConfig::from_toml_str(&text).unwrap(), config);
    }
}
