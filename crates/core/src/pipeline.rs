use crate::analyzer::ContentAnalyzer;
use crate::audit::{self, SnapshotAudit};
use crate::categories::CategoryRegistry;
use crate::categorizer;
use crate::config::AppConfig;
use crate::models::PlaylistSnapshot;
use crate::plan::{Plan, PlanBuilder};
use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    Plan,
    Audit,
    All,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub delete_max_videos: u64,
    pub large_playlist_threshold: u64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            delete_max_videos: crate::plan::DEFAULT_DELETE_MAX_VIDEOS,
            large_playlist_threshold: audit::DEFAULT_LARGE_PLAYLIST_THRESHOLD,
        }
    }
}

impl From<&AppConfig> for PipelineOptions {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            delete_max_videos: cfg.plan.delete_max_videos,
            large_playlist_threshold: cfg.audit.large_playlist_threshold,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub playlists: usize,
    pub categorized: usize,
    pub uncategorized: usize,
    pub suggestions: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub plan: Option<Plan>,
    pub audit: Option<SnapshotAudit>,
    pub summary: PipelineSummary,
}

pub fn run_with_mode(
    snapshot: &PlaylistSnapshot,
    registry: &CategoryRegistry,
    options: &PipelineOptions,
    mode: PipelineMode,
) -> PipelineOutput {
    run_with_mode_at(snapshot, registry, options, mode, Local::now().into())
}

pub fn run_with_mode_at(
    snapshot: &PlaylistSnapshot,
    registry: &CategoryRegistry,
    options: &PipelineOptions,
    mode: PipelineMode,
    timestamp: DateTime<FixedOffset>,
) -> PipelineOutput {
    if snapshot.total_playlists != snapshot.playlists.len() {
        warn!(
            stated = snapshot.total_playlists,
            present = snapshot.playlists.len(),
            "snapshot total does not match its playlist list"
        );
    }

    let mut summary = PipelineSummary {
        playlists: snapshot.playlists.len(),
        ..PipelineSummary::default()
    };

    let audit = if matches!(mode, PipelineMode::Audit | PipelineMode::All) {
        info!("Starting audit phase...");
        let report = audit::audit(snapshot, options.large_playlist_threshold);
        info!(
            empty = report.empty_playlists.len(),
            large = report.large_playlists.len(),
            duplicates = report.duplicate_titles.len(),
            "Audit complete."
        );
        Some(report)
    } else {
        None
    };

    let plan = if matches!(mode, PipelineMode::Plan | PipelineMode::All) {
        info!(categories = registry.len(), "Starting categorization phase...");
        let analyzer = ContentAnalyzer::new(registry);
        let grouping = categorizer::categorize(&analyzer, &snapshot.playlists);
        summary.uncategorized = grouping.uncategorized().len();
        summary.categorized = grouping.playlist_count() - summary.uncategorized;

        info!("Starting plan phase...");
        let plan = PlanBuilder::new(registry)
            .delete_max_videos(options.delete_max_videos)
            .build_plan_at(&grouping, snapshot.total_playlists, timestamp);
        summary.suggestions = plan.suggestion_count();
        info!(suggestions = summary.suggestions, "Plan complete.");
        Some(plan)
    } else {
        None
    };

    PipelineOutput {
        plan,
        audit,
        summary,
    }
}
