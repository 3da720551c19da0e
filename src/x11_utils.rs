use anyhow::{Context, Result};
use tracing::debug;
use x11rb::connection::Connection;
use x11rb::protocol::randr::{self, ConnectionExt as RandrExt, ModeInfo};
use x11rb::protocol::xproto::Window;
use x11rb::rust_connection::RustConnection;

use crate::constants::randr::{MAJOR_VERSION, MINOR_VERSION};
use crate::screen::situation::{Output, OutputSource};
use crate::screen::Resolution;

/// Lists outputs through the RandR extension of the running X server
pub struct RandrOutputs {
    conn: RustConnection,
    root: Window,
}

impl RandrOutputs {
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None)
            .context("Failed to connect to the X server. Is DISPLAY set?")?;
        let root = conn.setup().roots[screen_num].root;

        let version = conn
            .randr_query_version(MAJOR_VERSION, MINOR_VERSION)
            .context("Failed to query RandR version")?
            .reply()
            .context("Failed to get reply for RandR version query (is RandR supported?)")?;
        if (version.major_version, version.minor_version) < (MAJOR_VERSION, MINOR_VERSION) {
            anyhow::bail!(
                "RandR {}.{} is too old, need at least {}.{}",
                version.major_version,
                version.minor_version,
                MAJOR_VERSION,
                MINOR_VERSION
            );
        }
        debug!(
            major = version.major_version,
            minor = version.minor_version,
            screen = screen_num,
            "connected to x11 with RandR"
        );
        Ok(Self { conn, root })
    }
}

impl OutputSource for RandrOutputs {
    fn outputs(&self) -> Result<Vec<Output>> {
        let resources = self
            .conn
            .randr_get_screen_resources_current(self.root)
            .context("Failed to query RandR screen resources")?
            .reply()
            .context("Failed to get reply for RandR screen resources")?;

        let mut outputs = Vec::with_capacity(resources.outputs.len());
        for &output in &resources.outputs {
            let info = self
                .conn
                .randr_get_output_info(output, resources.config_timestamp)
                .context(format!("Failed to query RandR output {}", output))?
                .reply()
                .context(format!("Failed to get reply for RandR output {}", output))?;
            let name = String::from_utf8_lossy(&info.name).into_owned();
            let connected = info.connection == randr::Connection::CONNECTED;
            let resolutions = mode_resolutions(&info.modes, &resources.modes);
            debug!(
                output = %name,
                connected,
                preferred = info.num_preferred,
                modes = resolutions.len(),
                "discovered output"
            );
            outputs.push(Output {
                name,
                connected,
                resolutions,
            });
        }
        Ok(outputs)
    }
}

/// Resolve an output's mode ids. Keeps the server's order (preferred modes
/// first) and drops sizes already seen at another refresh rate.
fn mode_resolutions(mode_ids: &[randr::Mode], modes: &[ModeInfo]) -> Vec<Resolution> {
    let mut resolutions = Vec::new();
    for id in mode_ids {
        let Some(mode) = modes.iter().find(|mode| mode.id == *id) else {
            continue;
        };
        let res = Resolution::new(mode.width.into(), mode.height.into());
        if !resolutions.contains(&res) {
            resolutions.push(res);
        }
    }
    resolutions
}
