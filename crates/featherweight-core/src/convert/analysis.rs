use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    enum_from_name, enum_name, from_optional_timestamp, from_timestamp, to_optional_timestamp,
    to_timestamp, RemoteConvert,
};
use crate::models::{ParseRequest, TrainingAnalysis};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTrainingAnalysis {
    pub id: String,
    pub user_id: Option<String>,
    pub analysis_date: DateTime<Utc>,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    #[serde(default)]
    pub overall_assessment: String,
    #[serde(default)]
    pub key_insights_json: String,
    #[serde(default)]
    pub recommendations_json: String,
    #[serde(default)]
    pub warnings_json: String,
}

impl RemoteConvert for TrainingAnalysis {
    type Remote = RemoteTrainingAnalysis;

    fn to_remote(&self) -> RemoteTrainingAnalysis {
        RemoteTrainingAnalysis {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            analysis_date: to_timestamp(self.analysis_date),
            period_start: to_timestamp(self.period_start),
            period_end: to_timestamp(self.period_end),
            overall_assessment: self.overall_assessment.clone(),
            key_insights_json: self.key_insights_json.clone(),
            recommendations_json: self.recommendations_json.clone(),
            warnings_json: self.warnings_json.clone(),
        }
    }

    fn from_remote(remote: RemoteTrainingAnalysis) -> Self {
        Self {
            id: remote.id,
            user_id: remote.user_id,
            analysis_date: from_timestamp(remote.analysis_date),
            period_start: from_timestamp(remote.period_start),
            period_end: from_timestamp(remote.period_end),
            overall_assessment: remote.overall_assessment,
            key_insights_json: remote.key_insights_json,
            recommendations_json: remote.recommendations_json,
            warnings_json: remote.warnings_json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteParseRequest {
    pub id: String,
    pub user_id: Option<String>,
    pub raw_text: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub result_json: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl RemoteConvert for ParseRequest {
    type Remote = RemoteParseRequest;

    fn to_remote(&self) -> RemoteParseRequest {
        RemoteParseRequest {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            raw_text: self.raw_text.clone(),
            status: enum_name(&self.status),
            result_json: self.result_json.clone(),
            error: self.error.clone(),
            created_at: to_timestamp(self.created_at),
            completed_at: to_optional_timestamp(self.completed_at),
        }
    }

    fn from_remote(remote: RemoteParseRequest) -> Self {
        Self {
            status: enum_from_name(&remote.status, "status"),
            id: remote.id,
            user_id: remote.user_id,
            raw_text: remote.raw_text,
            result_json: remote.result_json,
            error: remote.error,
            created_at: from_timestamp(remote.created_at),
            completed_at: from_optional_timestamp(remote.completed_at),
        }
    }
}
