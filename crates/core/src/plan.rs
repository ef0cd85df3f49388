//! Turns a categorization into merge / rename / delete suggestions.
//!
//! Rules, per category (Uncategorized excluded from `categories`):
//! - more than one member: one merge suggestion for the whole group;
//! - exactly one member whose title differs from the suggested name: one
//!   rename suggestion;
//! - Uncategorized members with at most `delete_max_videos` videos: one
//!   delete suggestion each.

use crate::categories::CategoryRegistry;
use crate::categorizer::{Categorization, CategoryGroup, ScoredPlaylist};
use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

pub const DEFAULT_DELETE_MAX_VIDEOS: u64 = 1;
pub const DELETE_REASON: &str = "insufficient video count";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub title: String,
    pub video_count: u64,
    pub confidence: f64,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub suggested_name: String,
    pub description: String,
    pub playlists: usize,
    pub total_videos: u64,
    pub playlist_details: Vec<PlaylistDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeSuggestion {
    pub category: String,
    pub target_name: String,
    pub playlists_to_merge: Vec<String>,
    pub total_videos: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameSuggestion {
    pub current_name: String,
    pub suggested_name: String,
    pub category: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteSuggestion {
    pub title: String,
    pub video_count: u64,
    pub reason: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub timestamp: String,
    pub original_count: usize,
    pub categories: BTreeMap<String, CategorySummary>,
    pub merge_suggestions: Vec<MergeSuggestion>,
    pub rename_suggestions: Vec<RenameSuggestion>,
    pub delete_suggestions: Vec<DeleteSuggestion>,
}

impl Plan {
    pub fn suggestion_count(&self) -> usize {
        self.merge_suggestions.len() + self.rename_suggestions.len() + self.delete_suggestions.len()
    }

    pub fn categorized_videos(&self) -> u64 {
        self.categories.values().map(|c| c.total_videos).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> Self {
        if confidence > 0.7 {
            ConfidenceBand::High
        } else if confidence > 0.3 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::Low => "low",
        };
        f.write_str(label)
    }
}

pub struct PlanBuilder<'r> {
    registry: &'r CategoryRegistry,
    delete_max_videos: u64,
}

impl<'r> PlanBuilder<'r> {
    pub fn new(registry: &'r CategoryRegistry) -> Self {
        Self {
            registry,
            delete_max_videos: DEFAULT_DELETE_MAX_VIDEOS,
        }
    }

    pub fn delete_max_videos(mut self, max: u64) -> Self {
        self.delete_max_videos = max;
        self
    }

    pub fn build_plan(&self, grouping: &Categorization<'_>, original_count: usize) -> Plan {
        self.build_plan_at(grouping, original_count, Local::now().into())
    }

    pub fn build_plan_at(
        &self,
        grouping: &Categorization<'_>,
        original_count: usize,
        timestamp: DateTime<FixedOffset>,
    ) -> Plan {
        let mut plan = Plan {
            timestamp: timestamp.to_rfc3339(),
            original_count,
            categories: BTreeMap::new(),
            merge_suggestions: Vec::new(),
            rename_suggestions: Vec::new(),
            delete_suggestions: Vec::new(),
        };

        for group in grouping.categorized() {
            let (suggested_name, description) = self.display_of(&group.category);
            plan.categories.insert(
                group.category.clone(),
                summarize(group, &suggested_name, &description),
            );

            match group.members.as_slice() {
                [] => {}
                [single] => {
                    if single.title() != suggested_name {
                        plan.rename_suggestions.push(RenameSuggestion {
                            current_name: single.title().to_string(),
                            suggested_name,
                            category: group.category.clone(),
                            id: single.playlist.id.clone(),
                        });
                    }
                }
                members => plan.merge_suggestions.push(MergeSuggestion {
                    category: group.category.clone(),
                    target_name: suggested_name,
                    playlists_to_merge: members.iter().map(|m| m.title().to_string()).collect(),
                    total_videos: group.total_videos(),
                }),
            }
        }

        for member in grouping.uncategorized() {
            if member.video_count() <= self.delete_max_videos {
                plan.delete_suggestions.push(DeleteSuggestion {
                    title: member.title().to_string(),
                    video_count: member.video_count(),
                    reason: DELETE_REASON.to_string(),
                    id: member.playlist.id.clone(),
                });
            }
        }

        info!(
            categories = plan.categories.len(),
            merges = plan.merge_suggestions.len(),
            renames = plan.rename_suggestions.len(),
            deletes = plan.delete_suggestions.len(),
            "built reorganization plan"
        );
        plan
    }

    /// Falls back to the raw id when the category is not registered.
    fn display_of(&self, category: &str) -> (String, String) {
        match self.registry.get(category) {
            Some(c) => (c.suggested_name.clone(), c.description.clone()),
            None => (category.to_string(), String::new()),
        }
    }
}

fn summarize(
    group: &CategoryGroup<'_>,
    suggested_name: &str,
    description: &str,
) -> CategorySummary {
    CategorySummary {
        suggested_name: suggested_name.to_string(),
        description: description.to_string(),
        playlists: group.members.len(),
        total_videos: group.total_videos(),
        playlist_details: group.members.iter().map(detail).collect(),
    }
}

fn detail(member: &ScoredPlaylist<'_>) -> PlaylistDetail {
    PlaylistDetail {
        title: member.title().to_string(),
        video_count: member.video_count(),
        confidence: round2(member.confidence),
        id: member.playlist.id.clone(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ContentAnalyzer;
    use crate::categories::{Category, UNCATEGORIZED};
    use crate::categorizer::categorize;
    use crate::models::Playlist;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
            .unwrap()
    }

    fn plan_for(playlists: &[Playlist]) -> Plan {
        let registry = CategoryRegistry::builtin();
        let analyzer = ContentAnalyzer::new(&registry);
        let grouping = categorize(&analyzer, playlists);
        PlanBuilder::new(&registry).build_plan_at(&grouping, playlists.len(), fixed_time())
    }

    #[test]
    fn two_gaming_playlists_merge_in_input_order() {
        let playlists = vec![
            Playlist::new("g1", "Wukong boss fights", 10),
            Playlist::new("g2", "黑神话 攻略", 5),
        ];
        let plan = plan_for(&playlists);

        assert_eq!(plan.merge_suggestions.len(), 1);
        let merge = &plan.merge_suggestions[0];
        assert_eq!(merge.category, "Gaming");
        assert_eq!(merge.target_name, "🎮 游戏娱乐");
        assert_eq!(
            merge.playlists_to_merge,
            vec!["Wukong boss fights".to_string(), "黑神话 攻略".to_string()]
        );
        assert_eq!(merge.total_videos, 15);
        assert!(plan.rename_suggestions.is_empty());
    }

    #[test]
    fn singleton_already_named_is_left_alone() {
        let plan = plan_for(&[Playlist::new("m", "🎵 音乐放松", 7)]);
        assert!(plan.categories.contains_key("Music_Relaxation"));
        assert!(plan.rename_suggestions.is_empty());
        assert!(plan.merge_suggestions.is_empty());
    }

    #[test]
    fn singleton_with_other_title_is_renamed() {
        let plan = plan_for(&[Playlist::new("m", "late night jazz", 7)]);
        assert_eq!(plan.rename_suggestions.len(), 1);
        let rename = &plan.rename_suggestions[0];
        assert_eq!(rename.current_name, "late night jazz");
        assert_eq!(rename.suggested_name, "🎵 音乐放松");
        assert_eq!(rename.category, "Music_Relaxation");
        assert_eq!(rename.id, "m");
    }

    #[test]
    fn small_uncategorized_playlists_are_deletion_candidates() {
        let plan = plan_for(&[
            Playlist::new("u0", "Misc", 0),
            Playlist::new("u2", "Holiday", 2),
        ]);
        assert_eq!(plan.delete_suggestions.len(), 1);
        let delete = &plan.delete_suggestions[0];
        assert_eq!(delete.id, "u0");
        assert_eq!(delete.video_count, 0);
        assert!(delete.reason.contains("insufficient video count"));
        assert!(plan.categories.is_empty());
        assert!(!plan.categories.contains_key(UNCATEGORIZED));
    }

    #[test]
    fn delete_threshold_is_configurable() {
        let playlists = vec![Playlist::new("u2", "Holiday", 2)];
        let registry = CategoryRegistry::builtin();
        let analyzer = ContentAnalyzer::new(&registry);
        let grouping = categorize(&analyzer, &playlists);
        let plan = PlanBuilder::new(&registry)
            .delete_max_videos(2)
            .build_plan_at(&grouping, 1, fixed_time());
        assert_eq!(plan.delete_suggestions.len(), 1);
    }

    #[test]
    fn empty_input_gives_empty_plan() {
        let registry = CategoryRegistry::builtin();
        let analyzer = ContentAnalyzer::new(&registry);
        let grouping = categorize(&analyzer, &[]);
        let plan = PlanBuilder::new(&registry).build_plan_at(&grouping, 42, fixed_time());

        assert_eq!(plan.original_count, 42);
        assert!(plan.categories.is_empty());
        assert!(plan.merge_suggestions.is_empty());
        assert!(plan.rename_suggestions.is_empty());
        assert!(plan.delete_suggestions.is_empty());
        assert_eq!(plan.timestamp, "2025-01-02T03:04:05+08:00");
    }

    #[test]
    fn videos_are_conserved() {
        let playlists = vec![
            Playlist::new("1", "Claude coding", 11),
            Playlist::new("2", "cursor tips", 4),
            Playlist::new("3", "Bitcoin", 9),
            Playlist::new("4", "Misc", 1),
            Playlist::new("5", "Holiday", 6),
        ];
        let registry = CategoryRegistry::builtin();
        let analyzer = ContentAnalyzer::new(&registry);
        let grouping = categorize(&analyzer, &playlists);
        let plan = PlanBuilder::new(&registry).build_plan_at(&grouping, 5, fixed_time());

        let uncategorized: u64 = grouping.uncategorized().iter().map(|m| m.video_count()).sum();
        let input: u64 = playlists.iter().map(|p| p.video_count).sum();
        assert_eq!(plan.categorized_videos() + uncategorized, input);
    }

    #[test]
    fn no_playlist_is_both_merged_and_renamed() {
        let playlists = vec![
            Playlist::new("1", "Claude coding", 11),
            Playlist::new("2", "cursor tips", 4),
            Playlist::new("3", "Bitcoin", 9),
            Playlist::new("4", "教程 合集", 3),
        ];
        let plan = plan_for(&playlists);
        for rename in &plan.rename_suggestions {
            assert!(plan
                .merge_suggestions
                .iter()
                .all(|m| !m.playlists_to_merge.contains(&rename.current_name)));
        }
        assert_eq!(plan.merge_suggestions.len(), 1);
        assert_eq!(plan.rename_suggestions.len(), 2);
    }

    #[test]
    fn unknown_category_falls_back_to_id() {
        let custom =
            CategoryRegistry::new(vec![Category::new("Podcast", &["podcast"], "", "🎙️")]).unwrap();
        let playlists = vec![Playlist::new("p", "weekly podcast", 3)];
        let analyzer = ContentAnalyzer::new(&custom);
        let grouping = categorize(&analyzer, &playlists);

        let builtin = CategoryRegistry::builtin();
        let plan = PlanBuilder::new(&builtin).build_plan_at(&grouping, 1, fixed_time());
        let summary = &plan.categories["Podcast"];
        assert_eq!(summary.suggested_name, "Podcast");
        assert_eq!(summary.description, "");
        assert_eq!(plan.rename_suggestions[0].suggested_name, "Podcast");
    }

    #[test]
    fn details_round_confidence() {
        let plan = plan_for(&[Playlist::new("a", "Claude", 1).with_description("one two three")]);
        let detail = &plan.categories["AI_Programming"].playlist_details[0];
        assert_eq!(detail.confidence, 1.0);
        assert_eq!(round2(0.123_456), 0.12);
    }

    #[test]
    fn confidence_bands() {
        assert_eq!(ConfidenceBand::of(0.71), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::of(0.7), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::of(0.31), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::of(0.3), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::High.to_string(), "high");
    }

    #[test]
    fn plan_is_reproducible_for_fixed_time() {
        let playlists = vec![
            Playlist::new("1", "Claude coding", 11),
            Playlist::new("2", "Misc", 0),
        ];
        let a = serde_json::to_string(&plan_for(&playlists)).unwrap();
        let b = serde_json::to_string(&plan_for(&playlists)).unwrap();
        assert_eq!(a, b);
    }
}
