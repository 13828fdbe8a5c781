//! CLI-level errors (wraps tree and config errors)

use config::ConfigError;
use thiserror::Error;

use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value '{value}': {reason}")]
    InvalidValue { value: String, reason: String },

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::InvalidValue { .. } => crate::exitcode::DATAERR,
            CliError::Config(_) | CliError::Serialize(_) => crate::exitcode::CONFIG,
            CliError::Tree(_) => crate::exitcode::SOFTWARE,
        }
    }
}
