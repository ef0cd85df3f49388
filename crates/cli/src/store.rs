use anyhow::{Context, Result};
use playlist_core::plan::Plan;
use storage::models::NewSuggestion;

/// Records a plan and one `planned` row per suggestion.
pub async fn save_plan(db_path: &str, plan: &Plan) -> Result<i64> {
    let pool = storage::connect(db_path).await.context("db connect")?;
    storage::migrate(&pool).await.context("db migrate")?;

    let mut rows = Vec::with_capacity(plan.suggestion_count());
    for merge in &plan.merge_suggestions {
        rows.push(NewSuggestion {
            kind: "merge".into(),
            category: Some(merge.category.clone()),
            playlist_id: None,
            title: merge.target_name.clone(),
            payload_json: serde_json::to_string(merge)?,
        });
    }
    for rename in &plan.rename_suggestions {
        rows.push(NewSuggestion {
            kind: "rename".into(),
            category: Some(rename.category.clone()),
            playlist_id: Some(rename.id.clone()),
            title: rename.current_name.clone(),
            payload_json: serde_json::to_string(rename)?,
        });
    }
    for delete in &plan.delete_suggestions {
        rows.push(NewSuggestion {
            kind: "delete".into(),
            category: None,
            playlist_id: Some(delete.id.clone()),
            title: delete.title.clone(),
            payload_json: serde_json::to_string(delete)?,
        });
    }

    let plan_json = serde_json::to_string(plan)?;
    storage::insert_plan(
        &pool,
        &plan.timestamp,
        plan.original_count as i64,
        plan.categories.len() as i64,
        &plan_json,
        &rows,
    )
    .await
}

pub async fn fetch_plans(db_path: &str) -> Result<Vec<serde_json::Value>> {
    let pool = storage::connect(db_path).await?;
    storage::migrate(&pool).await?;
    let rows = storage::list_plans(&pool).await?;
    rows.into_iter()
        .map(|r| serde_json::to_value(r).map_err(Into::into))
        .collect()
}

/// Suggestions of `plan_id`, or of the latest plan when `None`.
pub async fn fetch_suggestions(
    db_path: &str,
    plan_id: Option<i64>,
    kind: Option<&str>,
) -> Result<Vec<serde_json::Value>> {
    let pool = storage::connect(db_path).await?;
    storage::migrate(&pool).await?;
    let plan_id = match plan_id {
        Some(id) => id,
        None => match storage::latest_plan_id(&pool).await? {
            Some(id) => id,
            None => return Ok(Vec::new()),
        },
    };
    let rows = storage::list_suggestions(&pool, plan_id, kind).await?;
    let mut vals = Vec::with_capacity(rows.len());
    for row in rows {
        let payload = serde_json::from_str::<serde_json::Value>(&row.payload_json)
            .with_context(|| format!("corrupt payload for suggestion {}", row.id))?;
        vals.push(serde_json::json!({
            "id": row.id,
            "plan_id": row.plan_id,
            "kind": row.kind,
            "category": row.category,
            "playlist_id": row.playlist_id,
            "title": row.title,
            "status": row.status,
            "payload": payload,
        }));
    }
    Ok(vals)
}
