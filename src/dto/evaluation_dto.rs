use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::evaluation::{Evaluation, Recommendation};
use crate::utils::validation::validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SubmitEvaluationRequest {
    #[validate(range(min = 1, max = 5))]
    pub overall_score: Option<i32>,
    pub recommendation: Option<Recommendation>,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub overall_notes: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub strengths: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub next_steps: String,
}

impl SubmitEvaluationRequest {
    /// Checks the submission preconditions and builds the evaluation; performs no I/O.
    pub fn into_evaluation(self, completed_at: DateTime<Utc>) -> Result<Evaluation> {
        validate(&self)?;

        let overall_score = self
            .overall_score
            .ok_or_else(|| Error::Validation("Overall score is required".to_string()))?;
        let recommendation = self
            .recommendation
            .ok_or_else(|| Error::Validation("Recommendation is required".to_string()))?;

        Ok(Evaluation {
            overall_score: Some(overall_score),
            recommendation,
            overall_notes: self.overall_notes,
            strengths: self.strengths,
            weaknesses: self.weaknesses,
            next_steps: self.next_steps,
            completed_at,
        })
    }
}
