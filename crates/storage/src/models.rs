use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlanRow {
    pub id: i64,
    pub created_at: i64,
    pub timestamp: String,
    pub original_count: i64,
    pub category_count: i64,
    pub suggestion_count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SuggestionRow {
    pub id: i64,
    pub plan_id: i64,
    pub kind: String,
    pub category: Option<String>,
    pub playlist_id: Option<String>,
    pub title: String,
    pub payload_json: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub kind: String,
    pub category: Option<String>,
    pub playlist_id: Option<String>,
    pub title: String,
    pub payload_json: String,
}
