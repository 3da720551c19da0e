//! One configuration pass: detect, decide, apply

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::backlight::Backlight;
use crate::config::Config;
use crate::constants::tools::XBACKLIGHT;
use crate::external::{DisplayTool, Xrandr};
use crate::frontend::Frontend;
use crate::screen::situation::{situation_by_config, OutputSource};
use crate::screen::xrandr::xrandr_args;
use crate::screen::{build_setup, Directives, ScreenSetup};
use crate::x11_utils::RandrOutputs;

/// State shared by the whole run
pub struct AppContext {
    pub frontend: Box<dyn Frontend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied(ScreenSetup),
    Cancelled,
}

/// Run against the live X server with the real tools
pub fn run(ctx: &mut AppContext, config_path: &Path, directives: &Directives) -> Result<Outcome> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let source = RandrOutputs::connect()?;
    configure(
        ctx,
        &config,
        directives,
        &source,
        &mut Xrandr,
        &Backlight::new(XBACKLIGHT),
    )
}

/// Work out the setup and apply it through `tool`
pub fn configure(
    ctx: &mut AppContext,
    config: &Config,
    directives: &Directives,
    source: &dyn OutputSource,
    tool: &mut dyn DisplayTool,
    backlight: &Backlight,
) -> Result<Outcome> {
    let situation = situation_by_config(config, source)?;

    let Some(setup) = build_setup(&situation, directives, ctx.frontend.as_mut())? else {
        info!("Setup cancelled by the user");
        return Ok(Outcome::Cancelled);
    };

    let args = xrandr_args(&situation, &setup);
    println!("Call that will be made: {} {}", tool.program(), args.join(" "));
    tool.apply(&args)?;

    // without an external screen the panel has to be visible
    if setup.ext_resolution().is_none() {
        backlight.turn_on();
    }
    Ok(Outcome::Applied(setup))
}
