//! Command handlers
//!
//! Configuration is resolved here: file (explicit, user or system), then
//! environment, then command-line flags.

use crate::cli::{Cli, Commands};
use crate::errors::ConfigError;
use crate::logging::{QueryLog, QueryLogEntry};
use crate::output::{colors_enabled, format_explain, format_reply, format_stats};
use crate::repl::run_repl;
use anyhow::{Context, Result};
use codedesk_common::{load_dataset, CandidateIndex, Desk, DeskConfig, RandomChooser, Transcript};
use std::io;
use std::time::Instant;
use tracing::{info, warn};

/// Number of candidates `ask --explain` prints
const EXPLAIN_LIMIT: usize = 5;

/// Resolve the effective configuration
pub fn load_config(cli: &Cli) -> Result<DeskConfig> {
    let mut config = match &cli.config {
        Some(path) => DeskConfig::load_from(path),
        None => DeskConfig::load(),
    }
    .context(ConfigError)?;

    config.apply_env().context(ConfigError)?;

    if let Some(path) = &cli.dataset {
        config.dataset.path = path.clone();
    }
    if let Some(min_score) = cli.min_score {
        config.matching.min_match_score = min_score;
    }
    if cli.exact_shortcut {
        config.matching.exact_match_shortcut = true;
    }

    config.validate().context(ConfigError)?;
    Ok(config)
}

/// Load the dataset and build a desk over it
pub fn open_desk(config: &DeskConfig) -> Result<Desk> {
    let index = load_index(config)?;
    Desk::new(index, config.schema.clone(), config)
        .context("Invalid show-all phrases")
        .context(ConfigError)
}

fn load_index(config: &DeskConfig) -> Result<CandidateIndex> {
    // validate() has checked the delimiter
    let delimiter = config.delimiter().unwrap_or(b',');
    let records = load_dataset(&config.dataset.path, &config.schema, delimiter)?;
    let index = CandidateIndex::build(records, config.matching.name_policy())?;
    info!(
        "Knowledge base ready: {} codes from {}",
        index.len(),
        config.dataset.path.display()
    );
    Ok(index)
}

fn query_log(config: &DeskConfig) -> Option<QueryLog> {
    if !config.log.query_log {
        return None;
    }
    let log = QueryLog::discover();
    if log.is_none() {
        warn!("Query log enabled but no log location could be determined");
    }
    log
}

/// Dispatch a parsed command line
pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        None | Some(Commands::Repl) => repl(&config),
        Some(Commands::Ask { query, explain }) => ask(&config, &query.join(" "), *explain),
        Some(Commands::Check) => check(&config),
        Some(Commands::Config) => print_config(&config),
    }
}

/// Interactive session on stdin/stdout
pub fn repl(config: &DeskConfig) -> Result<()> {
    let desk = open_desk(config)?;
    let log = query_log(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    run_repl(
        &desk,
        stdin.lock(),
        &mut stdout,
        &mut RandomChooser,
        log.as_ref(),
        colors_enabled(),
    )?;
    Ok(())
}

/// One lookup without history
pub fn ask(config: &DeskConfig, query: &str, explain: bool) -> Result<()> {
    let desk = open_desk(config)?;
    let color = colors_enabled();

    let started = Instant::now();
    let reply = desk.respond(query, &Transcript::new(), &mut RandomChooser);
    if let Some(log) = query_log(config) {
        log.record(&QueryLogEntry::new(query, &reply.outcome, started.elapsed()));
    }

    println!("{}", format_reply(&reply.text, color));

    if explain {
        let scores = desk.explain(query, EXPLAIN_LIMIT);
        println!();
        print!(
            "{}",
            format_explain(&scores, config.matching.min_match_score, color)
        );
    }
    Ok(())
}

/// Load and summarize the dataset
pub fn check(config: &DeskConfig) -> Result<()> {
    let index = load_index(config)?;
    print!(
        "{}",
        format_stats(
            &config.dataset.path.display().to_string(),
            &index.stats(),
            colors_enabled()
        )
    );
    Ok(())
}

/// Print the effective configuration
pub fn print_config(config: &DeskConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
