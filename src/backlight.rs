//! Making sure the laptop panel is actually lit
//!
//! Some machines come back from an external-only setup with the backlight at
//! zero. Best effort: every problem is logged and swallowed.

use tracing::{info, warn};

use crate::constants::backlight::FULL_BRIGHTNESS;
use crate::error::{Error, Result, ToolFailure};
use crate::external;

pub struct Backlight {
    program: String,
}

impl Backlight {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Current brightness as reported by `-get`
    pub fn get(&self) -> Result<f64> {
        let stdout = external::check_output(&self.program, &["-get".to_string()])?;
        stdout
            .trim()
            .parse()
            .map_err(|_| external::unexpected_output(&self.program, &stdout))
    }

    pub fn set(&self, percent: &str) -> Result<()> {
        external::check_output(&self.program, &["-set".to_string(), percent.to_string()])
            .map(|_| ())
    }

    /// Switch to full brightness if the backlight is off. `Ok(true)` when it
    /// had to be switched on.
    pub fn ensure_on(&self) -> Result<bool> {
        let current = self.get()?;
        if current == 0.0 {
            info!(program = %self.program, "Backlight is off, turning it on");
            self.set(FULL_BRIGHTNESS)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// [`Self::ensure_on`], reporting failures as warnings
    pub fn turn_on(&self) {
        match self.ensure_on() {
            Ok(_) => {}
            Err(Error::ExternalTool {
                failure: ToolFailure::NotFound,
                ..
            }) => warn!(
                "{} has not been found, unable to turn your laptop backlight on.",
                self.program
            ),
            Err(e) => warn!(
                error = %e,
                "{} returned an error while attempting to turn your laptop backlight on.",
                self.program
            ),
        }
    }
}
