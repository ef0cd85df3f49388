use crate::audit::DEFAULT_LARGE_PLAYLIST_THRESHOLD;
use crate::categories::{load_categories_from_dir, CategoryRegistry};
use crate::plan::DEFAULT_DELETE_MAX_VIDEOS;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub categories: CategoriesConfig,
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/organizer.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: "playlists_backup.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub plan_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plan_path: "reorganization_plan.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesConfig {
    /// Directory of `*.toml` category files layered over the builtin table.
    #[serde(default)]
    pub path: Option<String>,
    /// Start from an empty table instead of the builtin one.
    #[serde(default)]
    pub replace_builtin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub delete_max_videos: u64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            delete_max_videos: DEFAULT_DELETE_MAX_VIDEOS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub large_playlist_threshold: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            large_playlist_threshold: DEFAULT_LARGE_PLAYLIST_THRESHOLD,
        }
    }
}

impl CategoriesConfig {
    pub fn build_registry(&self) -> anyhow::Result<CategoryRegistry> {
        let base = if self.replace_builtin {
            CategoryRegistry::empty()
        } else {
            CategoryRegistry::builtin()
        };
        let Some(dir) = &self.path else {
            return Ok(base);
        };
        let extra = load_categories_from_dir(Path::new(dir))?;
        Ok(base.with_overrides(extra)?)
    }
}

/// Layers `config/default` (optional) or an explicit file, then
/// `ORGANIZER_*` environment variables (`__` separates sections).
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("ORGANIZER")
            .prefix_separator("_")
            .separator("__"),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
