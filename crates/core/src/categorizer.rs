//! Groups a playlist set by winning category.

use crate::analyzer::ContentAnalyzer;
use crate::categories::UNCATEGORIZED;
use crate::models::Playlist;
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlaylist<'a> {
    pub playlist: &'a Playlist,
    pub category: String,
    pub confidence: f64,
}

impl ScoredPlaylist<'_> {
    pub fn title(&self) -> &str {
        &self.playlist.title
    }

    pub fn video_count(&self) -> u64 {
        self.playlist.video_count
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: String,
    pub members: Vec<ScoredPlaylist<'a>>,
}

impl CategoryGroup<'_> {
    pub fn total_videos(&self) -> u64 {
        self.members.iter().map(|m| m.video_count()).sum()
    }
}

/// Non-empty groups in registry order, `Uncategorized` last. Members keep
/// input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Categorization<'a> {
    groups: Vec<CategoryGroup<'a>>,
}

impl<'a> Categorization<'a> {
    pub fn groups(&self) -> &[CategoryGroup<'a>] {
        &self.groups
    }

    pub fn get(&self, category: &str) -> Option<&CategoryGroup<'a>> {
        self.groups.iter().find(|g| g.category == category)
    }

    pub fn categorized(&self) -> impl Iterator<Item = &CategoryGroup<'a>> {
        self.groups.iter().filter(|g| g.category != UNCATEGORIZED)
    }

    pub fn uncategorized(&self) -> &[ScoredPlaylist<'a>] {
        self.get(UNCATEGORIZED)
            .map(|g| g.members.as_slice())
            .unwrap_or(&[])
    }

    pub fn playlist_count(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub fn categorize<'a>(
    analyzer: &ContentAnalyzer<'_>,
    playlists: &'a [Playlist],
) -> Categorization<'a> {
    let registry = analyzer.registry();
    let mut slots: HashMap<&str, usize> =
        registry.ids().enumerate().map(|(i, id)| (id, i)).collect();
    let uncategorized_slot = registry.len();
    slots.insert(UNCATEGORIZED, uncategorized_slot);

    let mut buckets: Vec<Vec<ScoredPlaylist<'a>>> = vec![Vec::new(); uncategorized_slot + 1];
    for playlist in playlists {
        let outcome = analyzer.score(playlist);
        let slot = slots
            .get(outcome.category.as_str())
            .copied()
            .unwrap_or(uncategorized_slot);
        buckets[slot].push(ScoredPlaylist {
            playlist,
            category: outcome.category,
            confidence: outcome.confidence,
        });
    }

    let labels = registry.ids().chain(std::iter::once(UNCATEGORIZED));
    let groups: Vec<CategoryGroup<'a>> = labels
        .zip(buckets)
        .filter(|(_, members)| !members.is_empty())
        .map(|(category, members)| CategoryGroup {
            category: category.to_string(),
            members,
        })
        .collect();

    info!(
        playlists = playlists.len(),
        groups = groups.len(),
        uncategorized = groups
            .iter()
            .find(|g| g.category == UNCATEGORIZED)
            .map_or(0, |g| g.members.len()),
        "categorized playlists"
    );
    Categorization { groups }
}
