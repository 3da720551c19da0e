//! Dialog frontend driven through the `zenity` helper program

use std::env;
use tracing::{debug, warn};

use super::{ask_setup, find_program, Frontend, Prompter};
use crate::constants::tools::ZENITY;
use crate::error::{Error, Result, ToolFailure};
use crate::external;
use crate::screen::{ScreenSetup, ScreenSituation};

pub const NAME: &str = "zenity";

const TITLE: &str = "Display Setup";

/// zenity exits with 1 when the dialog was cancelled or closed
const CANCEL_EXIT_CODE: i32 = 1;

#[derive(Debug, Default)]
pub struct ZenityFrontend;

impl ZenityFrontend {
    pub fn new() -> Self {
        Self
    }

    /// Needs a graphical session and the helper on `PATH`
    pub fn available() -> bool {
        let graphical =
            env::var_os("DISPLAY").is_some() || env::var_os("WAYLAND_DISPLAY").is_some();
        graphical && find_program(ZENITY).is_some()
    }
}

/// `--text` of a list dialog is always Pango markup (`--no-markup` is only
/// accepted by message dialogs), so the question is escaped instead
fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn list_args(question: &str, options: &[String]) -> Vec<String> {
    let mut args = vec![
        "--list".to_string(),
        format!("--title={TITLE}"),
        format!("--text={}", escape_markup(question)),
        "--column=Option".to_string(),
        "--hide-header".to_string(),
    ];
    args.extend(options.iter().cloned());
    args
}

fn error_args(message: &str) -> Vec<String> {
    vec![
        "--error".to_string(),
        "--no-markup".to_string(),
        format!("--title={TITLE}"),
        format!("--text={message}"),
    ]
}

/// Map zenity's answer back to an option index
fn selected_index(stdout: &str, options: &[String]) -> Option<usize> {
    let answer = stdout.trim_end_matches(['\n', '\r']);
    options.iter().position(|option| option == answer)
}

impl Prompter for ZenityFrontend {
    fn choose(&mut self, question: &str, options: &[String]) -> Result<Option<usize>> {
        let output = external::output(ZENITY, &list_args(question, options))?;

        if output.status.code() == Some(CANCEL_EXIT_CODE) {
            debug!(question, "Dialog cancelled");
            return Ok(None);
        }
        if !output.status.success() {
            return Err(Error::ExternalTool {
                tool: ZENITY.to_string(),
                failure: ToolFailure::Status {
                    status: output.status,
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                },
            });
        }
        Ok(selected_index(&String::from_utf8_lossy(&output.stdout), options))
    }
}

impl Frontend for ZenityFrontend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn setup(&mut self, situation: &ScreenSituation) -> Result<Option<ScreenSetup>> {
        ask_setup(self, situation)
    }

    fn error(&mut self, message: &str) {
        if let Err(e) = external::check_output(ZENITY, &error_args(message)) {
            warn!(error = %e, "Could not show error dialog");
            eprintln!("ERROR: {message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Internal screen only".to_string(), "Both screens".to_string()]
    }

    #[test]
    fn test_list_args_end_with_options() {
        let args = list_args("Which screens?", &options());
        assert_eq!(args[0], "--list");
        assert!(args.contains(&"--text=Which screens?".to_string()));
        assert_eq!(&args[args.len() - 2..], &options()[..]);
    }

    #[test]
    fn test_dialog_text_is_not_markup() {
        let message = "Cannot open display <none> & no fallback";
        let args = error_args(message);
        assert_eq!(args[0], "--error");
        assert!(args.contains(&"--no-markup".to_string()));
        assert!(args.contains(&format!("--text={message}")));

        let args = list_args("Use <b>both</b> & more?", &options());
        assert!(!args.contains(&"--no-markup".to_string()));
        assert!(args.contains(&"--text=Use &lt;b&gt;both&lt;/b&gt; &amp; more?".to_string()));
    }

    #[test]
    fn test_selected_index() {
        assert_eq!(selected_index("Both screens\n", &options()), Some(1));
        assert_eq!(selected_index("Internal screen only", &options()), Some(0));
        assert_eq!(selected_index("\n", &options()), None);
    }
}
