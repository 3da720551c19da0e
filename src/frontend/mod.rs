//! User interaction
//!
//! A frontend asks the user for a [`ScreenSetup`] when the command line left
//! the choice open, and shows errors. Two are provided:
//! - **cli**: prompts on the terminal, always available
//! - **zenity**: GTK dialogs through the `zenity` helper
//!
//! Both ask the same questions through [`Prompter`]; they differ only in how
//! a question is put to the user.

pub mod cli;
pub mod zenity;

use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::Result;
use crate::screen::{RelativeScreenPosition, Resolution, ScreenSetup, ScreenSituation};

pub use cli::CliFrontend;
pub use zenity::ZenityFrontend;

pub trait Frontend {
    fn name(&self) -> &'static str;

    /// `Ok(None)` when the user cancelled
    fn setup(&mut self, situation: &ScreenSituation) -> Result<Option<ScreenSetup>>;

    /// Show an error to the user
    fn error(&mut self, message: &str);
}

/// A single multiple-choice question
pub trait Prompter {
    /// Index into `options`, `Ok(None)` when the user cancelled
    fn choose(&mut self, question: &str, options: &[String]) -> Result<Option<usize>>;
}

/// Names accepted by `--frontend`
pub const FRONTENDS: [&str; 2] = [cli::NAME, zenity::NAME];

/// The requested frontend if it can be used, otherwise the best available one
pub fn select_frontend(requested: Option<&str>) -> Box<dyn Frontend> {
    if let Some(name) = requested {
        match name {
            cli::NAME => return Box::new(CliFrontend::stdio()),
            zenity::NAME if ZenityFrontend::available() => return Box::new(ZenityFrontend::new()),
            zenity::NAME => warn!(frontend = name, "Frontend is not available, falling back"),
            _ => warn!(frontend = name, known = ?FRONTENDS, "Unknown frontend, falling back"),
        }
    }
    let frontend: Box<dyn Frontend> = if ZenityFrontend::available() {
        Box::new(ZenityFrontend::new())
    } else {
        Box::new(CliFrontend::stdio())
    };
    info!(frontend = frontend.name(), "Selected frontend");
    frontend
}

/// Look `program` up in `PATH`
pub(crate) fn find_program(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screens {
    Internal,
    External,
    Both,
}

impl Screens {
    const ALL: [Screens; 3] = [Screens::Internal, Screens::External, Screens::Both];

    fn label(&self) -> &'static str {
        match self {
            Screens::Internal => "Internal screen only",
            Screens::External => "External screen only",
            Screens::Both => "Both screens",
        }
    }
}

/// Pick one of `items`, `None` on cancel
fn pick<P: Prompter + ?Sized, T: Copy>(
    prompter: &mut P,
    question: &str,
    items: &[T],
    label: impl Fn(&T) -> String,
) -> Result<Option<T>> {
    let options: Vec<String> = items.iter().map(label).collect();
    Ok(prompter
        .choose(question, &options)?
        .and_then(|idx| items.get(idx).copied()))
}

fn resolution_label(res: &Resolution) -> String {
    res.to_string()
}

/// Walk the user through the setup questions
pub fn ask_setup<P: Prompter + ?Sized>(
    prompter: &mut P,
    situation: &ScreenSituation,
) -> Result<Option<ScreenSetup>> {
    let internal = situation.internal_connector();
    let internal_res = situation.internal_resolutions();
    let Some((external, external_res)) = situation
        .external_connector()
        .zip(situation.external_resolutions())
    else {
        return Ok(Some(ScreenSetup::internal_only(internal_res[0])));
    };

    let Some(screens) = pick(prompter, "Which screens should be enabled?", &Screens::ALL, |s| {
        s.label().to_string()
    })?
    else {
        return Ok(None);
    };

    let int_question = format!("Resolution of the internal screen ({})", internal.name);
    let ext_question = format!("Resolution of the external screen ({})", external.name);

    match screens {
        Screens::Internal => Ok(pick(prompter, &int_question, internal_res, resolution_label)?
            .map(ScreenSetup::internal_only)),
        Screens::External => Ok(pick(prompter, &ext_question, external_res, resolution_label)?
            .map(ScreenSetup::external_only)),
        Screens::Both => {
            let common = situation.common_resolutions();
            let positions: Vec<RelativeScreenPosition> = RelativeScreenPosition::ALL
                .into_iter()
                .filter(|p| *p != RelativeScreenPosition::Mirror || !common.is_empty())
                .collect();
            let question = "How should the screens be arranged?";
            let Some(position) = pick(prompter, question, &positions, |p| p.label().to_string())?
            else {
                return Ok(None);
            };

            if position == RelativeScreenPosition::Mirror {
                return Ok(pick(prompter, "Resolution of both screens", &common, resolution_label)?
                    .map(ScreenSetup::mirror));
            }
            let Some(int_choice) = pick(prompter, &int_question, internal_res, resolution_label)?
            else {
                return Ok(None);
            };
            let Some(ext_choice) = pick(prompter, &ext_question, external_res, resolution_label)?
            else {
                return Ok(None);
            };
            Ok(Some(ScreenSetup::both(int_choice, ext_choice, position)))
        }
    }
}
