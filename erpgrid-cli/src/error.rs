use std::path::PathBuf;

use erpgrid_lib::GridError;

/// Errors reported by the `erpgrid` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid fixture {}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Invalid argument '{argument}': {reason}")]
    Argument { argument: String, reason: String },
}

impl CliError {
    pub fn argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Argument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
