#![forbid(unsafe_code)]

mod app;
mod backlight;
mod config;
mod constants;
mod error;
mod external;
mod frontend;
mod screen;
mod x11_utils;

use anyhow::Result;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use app::{AppContext, Outcome};
use config::Config;
use frontend::select_frontend;
use screen::{Directives, RelativeScreenPosition};

/// easy Display Setup for Laptops
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The frontend to be used for user interaction
    #[arg(short, long)]
    frontend: Option<String>,

    /// Set the position of external screen relative to internal one
    #[arg(
        short = 'r',
        long = "relative-position",
        ignore_case = true,
        value_parser = PossibleValuesParser::new(RelativeScreenPosition::NAMES)
            .try_map(|name| name.parse::<RelativeScreenPosition>()),
    )]
    rel_position: Option<RelativeScreenPosition>,

    /// If an external screen is connected, disable all the others
    #[arg(short, long, conflicts_with = "internal_only")]
    external_only: bool,

    /// Enable internal screen, disable all the others
    #[arg(short, long)]
    internal_only: bool,

    /// Config file to use instead of ~/.dsl.conf
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn directives(&self) -> Directives {
        Directives {
            internal_only: self.internal_only,
            external_only: self.external_only,
            rel_position: self.rel_position,
        }
    }
}

fn init_logging() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "info" => TraceLevel::INFO,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging()?;

    // frontend first, so errors below reach the user through it
    let mut ctx = AppContext {
        frontend: select_frontend(args.frontend.as_deref()),
    };
    let config_path = args.config.clone().unwrap_or_else(Config::path);

    match app::run(&mut ctx, &config_path, &args.directives()) {
        Ok(Outcome::Applied(_)) => Ok(ExitCode::SUCCESS),
        Ok(Outcome::Cancelled) => Ok(ExitCode::from(constants::exit::CANCELLED)),
        Err(err) => {
            debug!(error = ?err, "display setup failed");
            ctx.frontend.error(&format!("{err:#}"));
            Err(err)
        }
    }
}
