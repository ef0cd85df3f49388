use playlist_core::categories::{CategoryRegistry, UNCATEGORIZED};
use playlist_core::pipeline::{self, PipelineMode, PipelineOptions};
use playlist_core::plan::Plan;
use std::fs;
use tempfile::tempdir;

const SNAPSHOT: &str = r#"{
  "export_date": "2025-03-01T10:00:00",
  "total_playlists": 6,
  "playlists": [
    {
      "id": "PL_ai",
      "title": "AI Coding with Claude",
      "description": "",
      "video_count": 0,
      "privacy_status": "private",
      "created_at": "2024-01-01T00:00:00Z",
      "videos": []
    },
    {
      "id": "PL_wukong",
      "title": "Wukong boss guide",
      "description": "黑神话 攻略",
      "video_count": 12,
      "videos": [
        {"video_id": "v1", "title": "Chapter 1", "description": "game walkthrough", "position": 0}
      ]
    },
    {
      "id": "PL_steam",
      "title": "Steam gaming nights",
      "video_count": 5
    },
    {
      "id": "PL_music",
      "title": "🎵 音乐放松",
      "description": "lofi",
      "video_count": 40
    },
    {
      "id": "PL_empty",
      "title": "Misc",
      "video_count": 0
    },
    {
      "id": "PL_holiday",
      "title": "Holiday",
      "description": "beach 2023",
      "video_count": 2,
      "videos": [
        {"title": "Day one"},
        {"title": "Day two", "description": "sunset"}
      ]
    }
  ]
}"#;

fn build(snapshot_json: &str) -> Plan {
    let snapshot = serde_json::from_str(snapshot_json).unwrap();
    pipeline::run_with_mode(
        &snapshot,
        &CategoryRegistry::builtin(),
        &PipelineOptions::default(),
        PipelineMode::Plan,
    )
    .plan
    .unwrap()
}

#[test]
fn snapshot_to_plan() {
    let temp = tempdir().unwrap();
    let snapshot_path = temp.path().join("playlists_backup.json");
    let plan_path = temp.path().join("out").join("reorganization_plan.json");
    fs::write(&snapshot_path, SNAPSHOT).unwrap();

    let snapshot = cli::snapshot::load_snapshot(&snapshot_path).unwrap();
    assert_eq!(snapshot.playlists.len(), 6);

    let output = pipeline::run_with_mode(
        &snapshot,
        &CategoryRegistry::builtin(),
        &PipelineOptions::default(),
        PipelineMode::All,
    );
    let plan = output.plan.unwrap();
    assert_eq!(plan.original_count, 6);

    // Gaming: both playlists, input order.
    assert_eq!(plan.merge_suggestions.len(), 1);
    assert_eq!(
        plan.merge_suggestions[0].playlists_to_merge,
        vec!["Wukong boss guide".to_string(), "Steam gaming nights".to_string()]
    );
    assert_eq!(plan.merge_suggestions[0].total_videos, 17);

    // AI singleton is renamed, music singleton already carries the target name.
    assert_eq!(plan.rename_suggestions.len(), 1);
    assert_eq!(plan.rename_suggestions[0].id, "PL_ai");
    assert_eq!(plan.rename_suggestions[0].suggested_name, "🤖 AI编程开发");
    assert!(plan.categories.contains_key("Music_Relaxation"));

    // Only the empty uncategorized playlist is a deletion candidate.
    assert_eq!(plan.delete_suggestions.len(), 1);
    assert_eq!(plan.delete_suggestions[0].id, "PL_empty");
    assert!(!plan.categories.contains_key(UNCATEGORIZED));

    let audit = output.audit.unwrap();
    assert_eq!(audit.empty_playlists.len(), 2);
    assert_eq!(output.summary.uncategorized, 2);

    cli::snapshot::write_plan(&plan_path, &plan).unwrap();
    let written = fs::read_to_string(&plan_path).unwrap();
    assert!(written.contains("🎮 游戏娱乐"));
    let reread: Plan = serde_json::from_str(&written).unwrap();
    assert_eq!(reread, plan);
}

#[test]
fn plan_is_stable_apart_from_timestamp() {
    let mut a = build(SNAPSHOT);
    let mut b = build(SNAPSHOT);
    a.timestamp.clear();
    b.timestamp.clear();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn videos_are_conserved_across_the_plan() {
    let snapshot: playlist_core::models::PlaylistSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
    let plan = build(SNAPSHOT);

    let categorized_ids: Vec<&str> = plan
        .categories
        .values()
        .flat_map(|c| c.playlist_details.iter().map(|d| d.id.as_str()))
        .collect();
    let uncategorized: u64 = snapshot
        .playlists
        .iter()
        .filter(|p| !categorized_ids.contains(&p.id.as_str()))
        .map(|p| p.video_count)
        .sum();
    assert_eq!(plan.categorized_videos() + uncategorized, snapshot.total_videos());
}

#[test]
fn empty_snapshot_gives_empty_plan() {
    let plan = build(r#"{"total_playlists": 3, "playlists": []}"#);
    assert_eq!(plan.original_count, 3);
    assert!(plan.categories.is_empty());
    assert_eq!(plan.suggestion_count(), 0);
}

#[test]
fn missing_fields_default() {
    let plan = build(r#"{"playlists": [{"id": "x"}, {}]}"#);
    assert_eq!(plan.original_count, 0);
    assert_eq!(plan.delete_suggestions.len(), 2);
    assert!(plan.delete_suggestions.iter().all(|d| d.title.is_empty()));
}

#[test]
fn missing_snapshot_is_reported() {
    let temp = tempdir().unwrap();
    let err = cli::snapshot::load_snapshot(&temp.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("snapshot file not found"));

    let bad = temp.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();
    let err = cli::snapshot::load_snapshot(&bad).unwrap_err();
    assert!(err.to_string().contains("malformed snapshot"));
}
