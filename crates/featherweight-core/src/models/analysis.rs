//! Training analysis and programme parse request models

use serde::{Deserialize, Serialize};

/// Periodic AI-generated review of a user's training
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingAnalysis {
    pub id: String,
    pub user_id: Option<String>,
    pub analysis_date: i64,
    pub period_start: i64,
    pub period_end: i64,
    pub overall_assessment: String,
    pub key_insights_json: String,
    pub recommendations_json: String,
    pub warnings_json: String,
}

/// Processing state of a freeform programme parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParseRequestStatus {
    #[default]
    Processing,
    Completed,
    Failed,
    Imported,
}

/// A request to turn freeform programme text into a structured programme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    pub id: String,
    pub user_id: Option<String>,
    pub raw_text: String,
    pub status: ParseRequestStatus,
    pub result_json: Option<String>,
    pub error: Option<String>,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}
