//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap.
//! Keeps argument parsing separate from execution logic.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Codedesk CLI
#[derive(Parser, Debug)]
#[command(name = "codedeskctl")]
#[command(about = "Codedesk - fuzzy lookup for configuration codes", long_about = None)]
#[command(version = env!("CODEDESK_VERSION"))]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (overrides ~/.config/codedesk/config.toml and /etc/codedesk/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dataset file (overrides $CODEDESK_DATASET and the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Minimum score (0-100) for a code to count as a match
    #[arg(long, global = true, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_score: Option<u8>,

    /// Resolve ties at 100 to the first code instead of listing them
    #[arg(long, global = true)]
    pub exact_shortcut: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand (if not provided, starts the interactive session)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactive session (default)
    Repl,

    /// Answer one query and exit
    Ask {
        /// Code or setting name to look up
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Also print the best-scoring candidates
        #[arg(long)]
        explain: bool,
    },

    /// Load the dataset and report what it contains
    Check,

    /// Print the effective configuration as TOML
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_is_repl() {
        let cli = Cli::try_parse_from(["codedeskctl"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["codedeskctl", "ask", "print", "quality", "--explain"]).unwrap();
        match cli.command {
            Some(Commands::Ask { query, explain }) => {
                assert_eq!(query, vec!["print", "quality"]);
                assert!(explain);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "codedeskctl",
            "check",
            "--dataset",
            "kb.csv",
            "--min-score",
            "80",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Commands::Check));
        assert_eq!(cli.dataset, Some(PathBuf::from("kb.csv")));
        assert_eq!(cli.min_score, Some(80));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_min_score_range() {
        assert!(Cli::try_parse_from(["codedeskctl", "--min-score", "101", "check"]).is_err());
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(Cli::try_parse_from(["codedeskctl", "ask"]).is_err());
    }
}
