//! Detecting the current screen situation
//!
//! The display server reports every output it knows about. One connected
//! output is the laptop panel ("internal"), found either by an explicit
//! config entry or by trying the usual panel connector names. The first
//! remaining connected output, optionally restricted to a configured list,
//! is the external screen.

use tracing::{debug, info, warn};

use super::Resolution;
use crate::config::Config;
use crate::constants;
use crate::error::{Error, Result};

/// An output as reported by the display server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub name: String,
    pub connected: bool,
    /// Supported resolutions, preferred first
    pub resolutions: Vec<Resolution>,
}

/// Anything that can list the current outputs
pub trait OutputSource {
    fn outputs(&self) -> anyhow::Result<Vec<Output>>;
}

/// A connected output taking part in the setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub name: String,
    pub resolutions: Vec<Resolution>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSituation {
    /// Every output name the server reported, in server order
    connectors: Vec<String>,
    internal: Connector,
    external: Option<Connector>,
}

/// LVDS, LVDS0, LVDS1, LVDS-0, LVDS-1, eDP, eDP0, ...
pub fn common_internal_connector_names() -> Vec<String> {
    constants::connectors::INTERNAL_PREFIXES
        .iter()
        .flat_map(|prefix| {
            constants::connectors::INTERNAL_SUFFIXES
                .iter()
                .map(move |suffix| format!("{prefix}{suffix}"))
        })
        .collect()
}

/// Candidate internal connector names according to the config
pub fn internal_candidates(config: &Config) -> Result<Vec<String>> {
    match config.get(constants::config::INTERNAL_CONNECTOR) {
        Some([name]) => Ok(vec![name.clone()]),
        Some(_) => Err(Error::Config(
            "You must specify exactly one internal connector.".to_string(),
        )),
        None => Ok(common_internal_connector_names()),
    }
}

/// Query the outputs and classify them as the config says
pub fn situation_by_config(
    config: &Config,
    source: &dyn OutputSource,
) -> anyhow::Result<ScreenSituation> {
    let candidates = internal_candidates(config)?;
    let outputs = source.outputs()?;
    let externals = config.get(constants::config::EXTERNAL_CONNECTORS);
    Ok(ScreenSituation::new(outputs, &candidates, externals)?)
}

impl ScreenSituation {
    /// Classify `outputs`. The internal connector is the first name in
    /// `internal_candidates` that is connected and reports modes. With
    /// `external_names` only the listed outputs count as external.
    pub fn new(
        outputs: Vec<Output>,
        internal_candidates: &[String],
        external_names: Option<&[String]>,
    ) -> Result<Self> {
        let connected: Vec<&Output> = outputs.iter().filter(|o| o.connected).collect();
        debug!(
            connected = ?connected.iter().map(|o| o.name.as_str()).collect::<Vec<_>>(),
            "Connected outputs"
        );

        let matches: Vec<&Output> = internal_candidates
            .iter()
            .filter_map(|name| connected.iter().copied().find(|o| &o.name == name))
            .collect();
        let Some(first) = matches.first() else {
            return Err(Error::NoInternalConnector {
                tried: internal_candidates.to_vec(),
            });
        };
        let Some(internal) = matches.iter().copied().find(|o| !o.resolutions.is_empty()) else {
            return Err(Error::NoResolutions {
                connector: first.name.clone(),
            });
        };
        let skipped: Vec<&str> = matches
            .iter()
            .take_while(|o| o.name != internal.name)
            .map(|o| o.name.as_str())
            .collect();
        if !skipped.is_empty() {
            warn!(
                chosen = %internal.name,
                skipped = ?skipped,
                "Internal connector candidates without modes were skipped"
            );
        }
        let others: Vec<&str> = matches
            .iter()
            .skip(skipped.len() + 1)
            .map(|o| o.name.as_str())
            .collect();
        if !others.is_empty() {
            warn!(
                chosen = %internal.name,
                ignored = ?others,
                "Several internal connector candidates are connected, using the first"
            );
        }

        let external = connected
            .iter()
            .filter(|o| o.name != internal.name)
            .filter(|o| external_names.is_none_or(|names| names.contains(&o.name)))
            .find(|o| !o.resolutions.is_empty())
            .map(|o| Connector {
                name: o.name.clone(),
                resolutions: o.resolutions.clone(),
            });

        info!(
            internal = %internal.name,
            external = external.as_ref().map(|c| c.name.as_str()).unwrap_or("none"),
            "Detected screen situation"
        );

        Ok(Self {
            connectors: outputs.iter().map(|o| o.name.clone()).collect(),
            internal: Connector {
                name: internal.name.clone(),
                resolutions: internal.resolutions.clone(),
            },
            external,
        })
    }

    pub fn connectors(&self) -> &[String] {
        &self.connectors
    }

    pub fn internal_connector(&self) -> &Connector {
        &self.internal
    }

    pub fn external_connector(&self) -> Option<&Connector> {
        self.external.as_ref()
    }

    /// Never empty
    pub fn internal_resolutions(&self) -> &[Resolution] {
        &self.internal.resolutions
    }

    /// `None` when no external screen is connected, otherwise never empty
    pub fn external_resolutions(&self) -> Option<&[Resolution]> {
        self.external.as_ref().map(|c| c.resolutions.as_slice())
    }

    /// Resolutions supported by both screens, in internal preference order
    pub fn common_resolutions(&self) -> Vec<Resolution> {
        let Some(external) = self.external_resolutions() else {
            return Vec::new();
        };
        self.internal
            .resolutions
            .iter()
            .filter(|res| external.contains(*res))
            .copied()
            .collect()
    }
}
