//! Codedesk Control - terminal front-end for Codedesk
//!
//! Looks up configuration codes by code or setting name, interactively or
//! one query at a time.

use clap::Parser;
use codedeskctl::cli::Cli;
use codedeskctl::errors::{exit_code_for, EXIT_SUCCESS, EXIT_USAGE};
use codedeskctl::{commands, logging, output};
use std::process;
use tracing::debug;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = e.print();
            process::exit(code);
        }
    };

    logging::init_tracing(cli.verbose);
    debug!("codedeskctl v{} starting", env!("CODEDESK_VERSION"));

    if let Err(e) = commands::run(&cli) {
        output::display_error(&format!("{:#}", e));
        process::exit(exit_code_for(&e));
    }
}
