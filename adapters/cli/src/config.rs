use std::{fs, path::Path};

use anyhow::{Context, Result};
use tilerun_core::SimulationConfig;

/// Loads the simulation tuning, falling back to defaults without a path.
pub(crate) fn load(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read simulation config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid simulation config at {}", path.display()))
}

fn parse(contents: &str) -> Result<SimulationConfig> {
    toml::from_str(contents).context("failed to parse simulation config toml contents")
}
