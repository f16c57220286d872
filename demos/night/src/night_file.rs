//! The TOML night file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use nw_agent::AgentSpec;
use nw_core::{EpisodeConfig, ZoneId};
use nw_location::{LocationRegistry, LocationSpec};

/// Scene, cast and camera feeds for one night.
///
/// ```toml
/// cameras = [1, 2, 3]
///
/// [episode]
/// night_duration_secs = 360.0
/// seed = 42
///
/// [[locations]]
/// name = "Show Stage"
/// zone = 1
///
/// [[agents]]
/// name = "Freddy"
/// home = "Show Stage"
/// policy = { kind = "cyclic_scan" }
/// ```
#[derive(Debug, Deserialize)]
pub struct NightFile {
    #[serde(default)]
    pub episode: EpisodeConfig,

    /// Camera zones the tablet can show, in tablet order.
    #[serde(default)]
    pub cameras: Vec<ZoneId>,

    pub locations: Vec<LocationSpec>,

    #[serde(default)]
    pub agents: Vec<AgentSpec>,
}

impl NightFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading night file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing night file {}", path.display()))
    }

    pub fn registry(&self) -> Result<LocationRegistry> {
        LocationRegistry::from_specs(self.locations.iter().cloned()).context("building location registry")
    }
}
