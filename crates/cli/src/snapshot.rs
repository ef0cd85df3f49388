use anyhow::{Context, Result};
use playlist_core::models::PlaylistSnapshot;
use playlist_core::plan::Plan;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn load_snapshot(path: &Path) -> Result<PlaylistSnapshot> {
    if !path.exists() {
        anyhow::bail!("snapshot file not found: {}", path.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: PlaylistSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("malformed snapshot {}", path.display()))?;
    info!(
        path = %path.display(),
        playlists = snapshot.playlists.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

pub fn write_plan(path: &Path, plan: &Plan) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json).with_context(|| format!("failed to write plan {}", path.display()))?;
    info!(path = %path.display(), "saved reorganization plan");
    Ok(())
}
