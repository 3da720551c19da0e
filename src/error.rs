//! Error types for display setup.

use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for display setup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while working out and applying a screen setup.
#[derive(Debug, Error)]
pub enum Error {
    /// A config line is malformed (1-based line number).
    #[error("Invalid config, line {line}: Error parsing line (may be a quoting issue).")]
    ConfigParse { line: usize },

    /// The config parsed but makes no sense.
    #[error("{0}")]
    Config(String),

    /// None of the candidate internal connector names is connected.
    #[error("Could not find the internal connector, tried: {}", .tried.join(", "))]
    NoInternalConnector { tried: Vec<String> },

    /// A connected screen reports no usable modes.
    #[error("Connector {connector} reports no resolutions")]
    NoResolutions { connector: String },

    /// Mirroring was requested but the screens share no resolution.
    #[error("Internal and external screen have no common resolution")]
    NoCommonResolution,

    /// An external program is missing or failed.
    #[error("{tool}: {failure}")]
    ExternalTool { tool: String, failure: ToolFailure },

    /// Reading the config file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// How an external program failed.
#[derive(Debug, Error)]
pub enum ToolFailure {
    /// The program is not installed.
    #[error("not found")]
    NotFound,

    /// The program exists but could not be started.
    #[error("could not be started: {0}")]
    Spawn(std::io::Error),

    /// The program ran and reported failure.
    #[error("exited with {status}{}", stderr_suffix(.stderr))]
    Status { status: ExitStatus, stderr: String },

    /// The program printed something we could not make sense of.
    #[error("unexpected output {0:?}")]
    Output(String),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
