use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::evaluation::{InterviewResult, Recommendation};
use crate::models::interview::InterviewStatus;

/// Every write the conduct core makes against an interview record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterviewUpdateCommand {
    MarkInProgress,
    SubmitEvaluation {
        result: InterviewResult,
        overall_rating: Option<i32>,
        average_score: Option<Decimal>,
        notes: String,
        recommendation: Recommendation,
        next_steps: Option<String>,
    },
}

impl InterviewUpdateCommand {
    /// Status the interview ends up in once the command is applied.
    pub fn target_status(&self) -> InterviewStatus {
        match self {
            InterviewUpdateCommand::MarkInProgress => InterviewStatus::InProgress,
            InterviewUpdateCommand::SubmitEvaluation { .. } => InterviewStatus::Completed,
        }
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            InterviewUpdateCommand::MarkInProgress => "mark_in_progress",
            InterviewUpdateCommand::SubmitEvaluation { .. } => "submit_evaluation",
        }
    }
}
