//! Storage layer: SQLite schema and helpers for persisted plans.
//!
//! Holds DB pool setup, the migration runner and plan/suggestion rows.

pub mod models;

use anyhow::Context;
use models::{NewSuggestion, PlanRow, SuggestionRow};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Opens a pool on a `sqlite:` URL or a plain file path, creating the
/// database file and its parent directory when missing.
pub async fn connect(database: &str) -> anyhow::Result<SqlitePool> {
    let url = if database.starts_with("sqlite:") {
        database.to_string()
    } else {
        let path = Path::new(database);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("creating database directory {}", parent.display())
            })?;
        }
        let norm = path.to_string_lossy().replace('\\', "/");
        if path.is_absolute() {
            format!("sqlite:///{}", norm.trim_start_matches('/'))
        } else {
            format!("sqlite://{norm}")
        }
    };
    let options = SqliteConnectOptions::from_str(&url)
        .with_context(|| format!("invalid database location {database}"))?
        .create_if_missing(true);
    // In-memory databases are per connection.
    let max_connections = if url.contains(":memory:") { 1 } else { 5 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("opening database {database}"))?;
    debug!(database, max_connections, "connected");
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("applying plan store migrations")?;
    Ok(())
}

/// Stores a plan and its suggestions in one transaction, returning the plan id.
pub async fn insert_plan(
    pool: &SqlitePool,
    timestamp: &str,
    original_count: i64,
    category_count: i64,
    plan_json: &str,
    suggestions: &[NewSuggestion],
) -> anyhow::Result<i64> {
    let mut tx = pool.begin().await?;
    let plan_id = sqlx::query(
        "INSERT INTO plans (timestamp, original_count, category_count, plan_json) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(timestamp)
    .bind(original_count)
    .bind(category_count)
    .bind(plan_json)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for s in suggestions {
        sqlx::query(
            "INSERT INTO suggestions (plan_id, kind, category, playlist_id, title, payload_json, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'planned')",
        )
        .bind(plan_id)
        .bind(&s.kind)
        .bind(&s.category)
        .bind(&s.playlist_id)
        .bind(&s.title)
        .bind(&s.payload_json)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    debug!(plan_id, suggestions = suggestions.len(), "stored plan");
    Ok(plan_id)
}

pub async fn list_plans(pool: &SqlitePool) -> anyhow::Result<Vec<PlanRow>> {
    let rows = sqlx::query_as::<_, PlanRow>(
        "SELECT plans.id, plans.created_at, plans.timestamp, plans.original_count, plans.category_count, COUNT(suggestions.id) AS suggestion_count FROM plans LEFT JOIN suggestions ON suggestions.plan_id = plans.id GROUP BY plans.id ORDER BY plans.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn latest_plan_id(pool: &SqlitePool) -> anyhow::Result<Option<i64>> {
    let id: Option<i64> = sqlx::query_scalar("SELECT MAX(id) FROM plans")
        .fetch_one(pool)
        .await?;
    Ok(id)
}

pub async fn plan_json(pool: &SqlitePool, plan_id: i64) -> anyhow::Result<Option<String>> {
    let json = sqlx::query_scalar("SELECT plan_json FROM plans WHERE id = ?1")
        .bind(plan_id)
        .fetch_optional(pool)
        .await?;
    Ok(json)
}

pub async fn list_suggestions(
    pool: &SqlitePool,
    plan_id: i64,
    kind: Option<&str>,
) -> anyhow::Result<Vec<SuggestionRow>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, plan_id, kind, category, playlist_id, title, payload_json, status FROM suggestions WHERE plan_id = ",
    );
    query.push_bind(plan_id);
    if let Some(k) = kind {
        query.push(" AND kind = ");
        query.push_bind(k);
    }
    query.push(" ORDER BY id");
    let rows = query
        .build_query_as::<SuggestionRow>()
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
