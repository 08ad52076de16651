use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::database::Snapshot;

/// Read a season from a JSON file.
pub fn load(path: &Path) -> anyhow::Result<Snapshot> {
    log::info!("loading season from {:?}...", path);
    let json = fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
    let season: Snapshot =
        serde_json::from_str(&json).with_context(|| format!("failed to parse {:?}", path))?;
    log::info!(
        "loaded {} maps and {} players",
        season.maps.len(),
        season.players.len()
    );
    Ok(season)
}

/// Write a season to a JSON file, replacing any previous content.
pub fn dump(path: &Path, season: &Snapshot) -> anyhow::Result<()> {
    log::info!("writing season to {:?}...", path);
    let json = serde_json::to_string_pretty(season).context("failed to serialize season")?;
    fs::write(path, json).with_context(|| format!("failed to write {:?}", path))?;
    Ok(())
}
