//! Plain-text rendering of plans, audits and the category table.

use playlist_core::audit::SnapshotAudit;
use playlist_core::categories::CategoryRegistry;
use playlist_core::plan::{ConfidenceBand, Plan};
use std::fmt::Write;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "----------------------------------------";

pub fn render_plan(plan: &Plan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Playlist analysis report");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "analyzed at: {}", plan.timestamp);
    let _ = writeln!(out, "original playlists: {}", plan.original_count);

    let _ = writeln!(out, "\ncategories:\n{THIN_RULE}");
    for summary in plan.categories.values() {
        let _ = writeln!(out, "\n{}", summary.suggested_name);
        let _ = writeln!(out, "  playlists: {}", summary.playlists);
        let _ = writeln!(out, "  total videos: {}", summary.total_videos);
        for detail in &summary.playlist_details {
            let _ = writeln!(
                out,
                "    [{}] {} ({} videos, confidence {:.2})",
                ConfidenceBand::of(detail.confidence),
                detail.title,
                detail.video_count,
                detail.confidence
            );
        }
    }

    if !plan.merge_suggestions.is_empty() {
        let _ = writeln!(out, "\nmerge suggestions:\n{THIN_RULE}");
        for merge in &plan.merge_suggestions {
            let _ = writeln!(out, "\ntarget: {}", merge.target_name);
            let _ = writeln!(out, "  merge: {}", merge.playlists_to_merge.join(", "));
            let _ = writeln!(out, "  total videos: {}", merge.total_videos);
        }
    }

    if !plan.rename_suggestions.is_empty() {
        let _ = writeln!(out, "\nrename suggestions:\n{THIN_RULE}");
        for rename in &plan.rename_suggestions {
            let _ = writeln!(out, "  {} -> {}", rename.current_name, rename.suggested_name);
        }
    }

    if !plan.delete_suggestions.is_empty() {
        let _ = writeln!(out, "\ndelete suggestions:\n{THIN_RULE}");
        for delete in &plan.delete_suggestions {
            let _ = writeln!(out, "  {} ({})", delete.title, delete.reason);
        }
    }

    let _ = writeln!(out, "\n{RULE}");
    out
}

pub fn render_audit(audit: &SnapshotAudit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "total playlists: {}", audit.total_playlists);
    let _ = writeln!(out, "total videos: {}", audit.total_videos);
    let _ = writeln!(out, "empty playlists: {}", audit.empty_playlists.len());
    let _ = writeln!(out, "large playlists: {}", audit.large_playlists.len());
    let _ = writeln!(out, "possible duplicate titles: {}", audit.duplicate_titles.len());
    if !audit.suggestions.is_empty() {
        let _ = writeln!(out, "\nsuggestions:");
        for s in &audit.suggestions {
            let _ = writeln!(out, "  - {s}");
        }
    }
    out
}

pub fn render_categories(registry: &CategoryRegistry) -> String {
    let mut out = String::new();
    for (i, category) in registry.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:2}. {} ({}) {}",
            i + 1,
            category.id,
            category.suggested_name,
            category.description
        );
        let _ = writeln!(out, "    keywords: {}", category.keywords.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use playlist_core::plan::{DeleteSuggestion, MergeSuggestion};
    use std::collections::BTreeMap;

    fn empty_plan() -> Plan {
        Plan {
            timestamp: "2025-01-01T00:00:00+00:00".into(),
            original_count: 0,
            categories: BTreeMap::new(),
            merge_suggestions: Vec::new(),
            rename_suggestions: Vec::new(),
            delete_suggestions: Vec::new(),
        }
    }

    #[test]
    fn empty_plan_has_no_suggestion_sections() {
        let text = render_plan(&empty_plan());
        assert!(text.contains("original playlists: 0"));
        assert!(!text.contains("merge suggestions"));
        assert!(!text.contains("delete suggestions"));
    }

    #[test]
    fn sections_appear_when_populated() {
        let mut plan = empty_plan();
        plan.merge_suggestions.push(MergeSuggestion {
            category: "Gaming".into(),
            target_name: "🎮 游戏娱乐".into(),
            playlists_to_merge: vec!["a".into(), "b".into()],
            total_videos: 3,
        });
        plan.delete_suggestions.push(DeleteSuggestion {
            title: "Misc".into(),
            video_count: 0,
            reason: "insufficient video count".into(),
            id: "x".into(),
        });
        let text = render_plan(&plan);
        assert!(text.contains("merge: a, b"));
        assert!(text.contains("Misc (insufficient video count)"));
    }

    #[test]
    fn lists_every_category() {
        let text = render_categories(&CategoryRegistry::builtin());
        assert_eq!(text.matches("keywords:").count(), 7);
        assert!(text.contains("Education_Learning"));
    }
}
