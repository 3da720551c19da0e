//! Screens, resolutions and layouts
//!
//! - **situation**: which connectors are plugged in and what they support
//! - **setup**: the chosen resolutions and relative position
//! - **xrandr**: turning a setup into an xrandr invocation

pub mod setup;
pub mod situation;
pub mod xrandr;

use std::fmt;
use std::str::FromStr;

pub use setup::{build_setup, Directives, ScreenSetup};
pub use situation::ScreenSituation;

/// A display mode size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Where the external screen sits relative to the internal one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeScreenPosition {
    Left,
    Right,
    Above,
    Below,
    Mirror,
}

impl RelativeScreenPosition {
    pub const ALL: [RelativeScreenPosition; 5] = [
        RelativeScreenPosition::Left,
        RelativeScreenPosition::Right,
        RelativeScreenPosition::Above,
        RelativeScreenPosition::Below,
        RelativeScreenPosition::Mirror,
    ];

    /// Lowercase names accepted on the command line, in `ALL` order
    pub const NAMES: [&'static str; 5] = ["left", "right", "above", "below", "mirror"];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeScreenPosition::Left => "left",
            RelativeScreenPosition::Right => "right",
            RelativeScreenPosition::Above => "above",
            RelativeScreenPosition::Below => "below",
            RelativeScreenPosition::Mirror => "mirror",
        }
    }

    /// Human readable label for interactive frontends
    pub fn label(&self) -> &'static str {
        match self {
            RelativeScreenPosition::Left => "External screen left of internal screen",
            RelativeScreenPosition::Right => "External screen right of internal screen",
            RelativeScreenPosition::Above => "External screen above internal screen",
            RelativeScreenPosition::Below => "External screen below internal screen",
            RelativeScreenPosition::Mirror => "External screen mirrors internal screen",
        }
    }
}

impl fmt::Display for RelativeScreenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelativeScreenPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::NAMES
            .iter()
            .position(|name| *name == lower)
            .map(|idx| Self::ALL[idx])
            .ok_or_else(|| format!("unknown relative position '{s}'"))
    }
}
