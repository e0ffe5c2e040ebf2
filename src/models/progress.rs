use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;
use crate::models::response::ResponseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::InProgress => "in_progress",
            ProgressStatus::Completed => "completed",
        }
    }
}

impl FromStr for ProgressStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(ProgressStatus::InProgress),
            "completed" => Ok(ProgressStatus::Completed),
            other => Err(Error::Internal(format!("Unknown progress status: {}", other))),
        }
    }
}

/// Partial-save snapshot of a conduct session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub interview_id: Uuid,
    pub current_question_index: usize,
    pub responses: Vec<ResponseRecord>,
    pub total_time_spent_seconds: i64,
    pub status: ProgressStatus,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ProgressRow {
    pub interview_id: Uuid,
    pub current_question_index: i32,
    pub responses: Json<Vec<ResponseRecord>>,
    pub total_time_spent_seconds: i64,
    pub status: String,
    pub saved_at: DateTime<Utc>,
}

impl TryFrom<ProgressRow> for ProgressRecord {
    type Error = Error;

    fn try_from(row: ProgressRow) -> Result<Self, Self::Error> {
        Ok(Self {
            interview_id: row.interview_id,
            current_question_index: row.current_question_index.max(0) as usize,
            responses: row.responses.0,
            total_time_spent_seconds: row.total_time_spent_seconds,
            status: row.status.parse()?,
            saved_at: row.saved_at,
        })
    }
}
