//! Error codes and exit status for codedeskctl
//!
//! Exit codes follow sysexits.h where one fits.

use codedesk_common::DatasetError;
use std::fmt;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code for bad command-line usage (EX_USAGE)
pub const EXIT_USAGE: i32 = 64;

/// Exit code when the dataset cannot be loaded (EX_NOINPUT)
pub const EXIT_DATASET_ERROR: i32 = 66;

/// Exit code for configuration errors (EX_CONFIG)
pub const EXIT_CONFIG_ERROR: i32 = 78;

/// Context marker for configuration failures
#[derive(Debug, Clone, Copy)]
pub struct ConfigError;

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error")
    }
}

/// Map a failure to its exit code
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ConfigError>().is_some() {
        EXIT_CONFIG_ERROR
    } else if err.downcast_ref::<DatasetError>().is_some() {
        EXIT_DATASET_ERROR
    } else {
        EXIT_GENERAL_ERROR
    }
}
