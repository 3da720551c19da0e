use tracing::info;

use super::{RelativeScreenPosition, Resolution, ScreenSituation};
use crate::error::{Error, Result};
use crate::frontend::Frontend;

/// The chosen configuration. At least one screen is always enabled and a
/// relative position exists only when both are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSetup {
    int_resolution: Option<Resolution>,
    ext_resolution: Option<Resolution>,
    rel_position: Option<RelativeScreenPosition>,
}

impl ScreenSetup {
    pub fn internal_only(res: Resolution) -> Self {
        Self {
            int_resolution: Some(res),
            ext_resolution: None,
            rel_position: None,
        }
    }

    pub fn external_only(res: Resolution) -> Self {
        Self {
            int_resolution: None,
            ext_resolution: Some(res),
            rel_position: None,
        }
    }

    pub fn both(
        int_res: Resolution,
        ext_res: Resolution,
        position: RelativeScreenPosition,
    ) -> Self {
        Self {
            int_resolution: Some(int_res),
            ext_resolution: Some(ext_res),
            rel_position: Some(position),
        }
    }

    pub fn mirror(res: Resolution) -> Self {
        Self::both(res, res, RelativeScreenPosition::Mirror)
    }

    pub fn int_resolution(&self) -> Option<Resolution> {
        self.int_resolution
    }

    pub fn ext_resolution(&self) -> Option<Resolution> {
        self.ext_resolution
    }

    pub fn rel_position(&self) -> Option<RelativeScreenPosition> {
        self.rel_position
    }
}

/// What the command line asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directives {
    pub internal_only: bool,
    pub external_only: bool,
    pub rel_position: Option<RelativeScreenPosition>,
}

/// Decide the setup. Falls through to the frontend only when the directives
/// leave the choice open; `Ok(None)` means the user cancelled there.
pub fn build_setup(
    situation: &ScreenSituation,
    directives: &Directives,
    frontend: &mut dyn Frontend,
) -> Result<Option<ScreenSetup>> {
    let internal = situation.internal_resolutions()[0];
    let external = match situation.external_resolutions() {
        Some(resolutions) if !directives.internal_only => resolutions[0],
        _ => {
            info!(resolution = %internal, "Using internal screen only");
            return Ok(Some(ScreenSetup::internal_only(internal)));
        }
    };

    if directives.external_only {
        info!(resolution = %external, "Using external screen only");
        return Ok(Some(ScreenSetup::external_only(external)));
    }

    match directives.rel_position {
        Some(RelativeScreenPosition::Mirror) => {
            let res = situation
                .common_resolutions()
                .first()
                .copied()
                .ok_or(Error::NoCommonResolution)?;
            info!(resolution = %res, "Mirroring screens");
            Ok(Some(ScreenSetup::mirror(res)))
        }
        Some(position) => {
            info!(%internal, %external, %position, "Using both screens");
            Ok(Some(ScreenSetup::both(internal, external, position)))
        }
        None => {
            info!(frontend = frontend.name(), "Asking the user");
            frontend.setup(situation)
        }
    }
}
