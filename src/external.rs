//! Running external programs
//!
//! Blocking, no timeout, no retries. A missing program and a failing one are
//! told apart so callers can word their messages accordingly.

use std::io;
use std::process::{Command, Output};
use tracing::debug;

use crate::constants::tools::XRANDR;
use crate::error::{Error, Result, ToolFailure};

fn failure(tool: &str, failure: ToolFailure) -> Error {
    Error::ExternalTool {
        tool: tool.to_string(),
        failure,
    }
}

/// Run to completion and capture output; only start-up problems are errors
pub fn output(tool: &str, args: &[String]) -> Result<Output> {
    debug!(tool, ?args, "Running external program");
    Command::new(tool).args(args).output().map_err(|e| {
        let kind = if e.kind() == io::ErrorKind::NotFound {
            ToolFailure::NotFound
        } else {
            ToolFailure::Spawn(e)
        };
        failure(tool, kind)
    })
}

/// Run and return stdout, failing on a non-zero exit
pub fn check_output(tool: &str, args: &[String]) -> Result<String> {
    let out = output(tool, args)?;
    if !out.status.success() {
        return Err(failure(
            tool,
            ToolFailure::Status {
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            },
        ));
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

/// Error for output we could not interpret
pub fn unexpected_output(tool: &str, stdout: &str) -> Error {
    failure(tool, ToolFailure::Output(stdout.trim().to_string()))
}

/// Something that applies a layout given as xrandr-style arguments
pub trait DisplayTool {
    fn program(&self) -> &str;

    fn apply(&mut self, args: &[String]) -> Result<()>;
}

/// The real `xrandr`
#[derive(Debug, Default)]
pub struct Xrandr;

impl DisplayTool for Xrandr {
    fn program(&self) -> &str {
        XRANDR
    }

    fn apply(&mut self, args: &[String]) -> Result<()> {
        check_output(XRANDR, args).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_not_found() {
        let err = check_output("dsl-test-no-such-program", &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::ExternalTool { failure: ToolFailure::NotFound, .. }
        ));
        assert_eq!(err.to_string(), "dsl-test-no-such-program: not found");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_status_failure() {
        let err = check_output("false", &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::ExternalTool { failure: ToolFailure::Status { .. }, .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let out = check_output("echo", &["0.000000".to_string()]).unwrap();
        assert_eq!(out.trim(), "0.000000");
    }
}
