use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_count: u64,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Playlist {
    pub fn new(id: impl Into<String>, title: impl Into<String>, video_count: u64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            video_count,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_video(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.videos.push(Video {
            title: title.into(),
            description: description.into(),
            ..Video::default()
        });
        self
    }
}

/// A playlist export as written by the fetcher (`playlists_backup.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
    #[serde(default)]
    pub total_playlists: usize,
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

impl PlaylistSnapshot {
    pub fn new(playlists: Vec<Playlist>) -> Self {
        Self {
            export_date: None,
            total_playlists: playlists.len(),
            playlists,
        }
    }

    pub fn total_videos(&self) -> u64 {
        self.playlists.iter().map(|p| p.video_count).sum()
    }
}
