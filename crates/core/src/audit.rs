//! Snapshot health checks: empty, oversized and duplicate-titled playlists.

use crate::models::{Playlist, PlaylistSnapshot};
use serde::Serialize;
use std::collections::HashSet;

pub const DEFAULT_LARGE_PLAYLIST_THRESHOLD: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistRef {
    pub id: String,
    pub title: String,
    pub video_count: u64,
}

impl From<&Playlist> for PlaylistRef {
    fn from(p: &Playlist) -> Self {
        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            video_count: p.video_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotAudit {
    pub total_playlists: usize,
    pub total_videos: u64,
    pub empty_playlists: Vec<PlaylistRef>,
    pub large_playlists: Vec<PlaylistRef>,
    /// Every occurrence after the first of a title, compared case-insensitively.
    pub duplicate_titles: Vec<PlaylistRef>,
    pub suggestions: Vec<String>,
}

pub fn audit(snapshot: &PlaylistSnapshot, large_threshold: u64) -> SnapshotAudit {
    let playlists = &snapshot.playlists;

    let empty_playlists: Vec<PlaylistRef> = playlists
        .iter()
        .filter(|p| p.video_count == 0)
        .map(PlaylistRef::from)
        .collect();
    let large_playlists: Vec<PlaylistRef> = playlists
        .iter()
        .filter(|p| p.video_count > large_threshold)
        .map(PlaylistRef::from)
        .collect();

    let mut seen = HashSet::new();
    let duplicate_titles: Vec<PlaylistRef> = playlists
        .iter()
        .filter(|p| !seen.insert(p.title.to_lowercase()))
        .map(PlaylistRef::from)
        .collect();

    let mut suggestions = Vec::new();
    if !empty_playlists.is_empty() {
        suggestions.push(format!(
            "found {} empty playlists, consider deleting them",
            empty_playlists.len()
        ));
    }
    if !large_playlists.is_empty() {
        suggestions.push(format!(
            "found {} playlists with more than {} videos, consider splitting them",
            large_playlists.len(),
            large_threshold
        ));
    }
    if !duplicate_titles.is_empty() {
        suggestions.push(format!(
            "found {} playlists whose titles duplicate another playlist",
            duplicate_titles.len()
        ));
    }

    SnapshotAudit {
        total_playlists: playlists.len(),
        total_videos: snapshot.total_videos(),
        empty_playlists,
        large_playlists,
        duplicate_titles,
        suggestions,
    }
}
