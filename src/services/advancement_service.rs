use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{Config, DEFAULT_ADVANCEMENT_TYPES};
use crate::error::{Error, Result};
use crate::models::interview::{Interview, InterviewType};
use crate::models::pipeline::{JobApplication, PipelineStage};
use crate::services::collaborators::PipelineGateway;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancementRules {
    pub enabled: bool,
    pub min_rating: i32,
    pub eligible_types: Vec<InterviewType>,
}

impl Default for AdvancementRules {
    fn default() -> Self {
        Self {
            enabled: true,
            min_rating: 3,
            eligible_types: DEFAULT_ADVANCEMENT_TYPES.to_vec(),
        }
    }
}

impl AdvancementRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enabled: config.auto_advance_enabled,
            min_rating: config.auto_advance_min_rating,
            eligible_types: config.auto_advance_interview_types.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    RatingBelowThreshold(i32),
    IneligibleType(InterviewType),
    NoApplication,
    CurrentStageNotFound(String),
    AlreadyFinalStage(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "automatic advancement is disabled"),
            SkipReason::RatingBelowThreshold(rating) => {
                write!(f, "rating {} is below the advancement threshold", rating)
            }
            SkipReason::IneligibleType(kind) => {
                write!(f, "{} interviews do not trigger advancement", kind)
            }
            SkipReason::NoApplication => write!(f, "interview has no job application"),
            SkipReason::CurrentStageNotFound(stage) => {
                write!(f, "no pipeline stage matches '{}'", stage)
            }
            SkipReason::AlreadyFinalStage(stage) => write!(f, "'{}' is the final stage", stage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvancementDecision {
    Advance {
        from: PipelineStage,
        to: PipelineStage,
        note: String,
    },
    Skip(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvancementOutcome {
    Advanced {
        application_id: Uuid,
        from_stage: String,
        to_stage: String,
    },
    Skipped(SkipReason),
    Failed(String),
}

#[derive(Clone)]
pub struct StageAdvancementPolicy {
    pipeline: Arc<dyn PipelineGateway>,
    rules: AdvancementRules,
}

impl StageAdvancementPolicy {
    pub fn new(pipeline: Arc<dyn PipelineGateway>, rules: AdvancementRules) -> Self {
        Self { pipeline, rules }
    }

    /// Gates that need nothing beyond the interview itself.
    pub fn check_eligibility(&self, interview: &Interview) -> std::result::Result<(), SkipReason> {
        if !self.rules.enabled {
            return Err(SkipReason::Disabled);
        }
        if let Some(rating) = interview.overall_rating {
            if rating < self.rules.min_rating {
                return Err(SkipReason::RatingBelowThreshold(rating));
            }
        }
        if !self.rules.eligible_types.contains(&interview.interview_type) {
            return Err(SkipReason::IneligibleType(interview.interview_type));
        }
        Ok(())
    }

    pub fn decide(
        &self,
        interview: &Interview,
        application: &JobApplication,
        stages: &[PipelineStage],
    ) -> AdvancementDecision {
        if let Err(reason) = self.check_eligibility(interview) {
            return AdvancementDecision::Skip(reason);
        }

        let mut ordered: Vec<&PipelineStage> = stages.iter().collect();
        ordered.sort_by_key(|stage| stage.order);

        let Some(position) = ordered
            .iter()
            .position(|stage| stage.matches_name(&application.current_stage))
        else {
            return AdvancementDecision::Skip(SkipReason::CurrentStageNotFound(
                application.current_stage.clone(),
            ));
        };

        match ordered.get(position + 1) {
            Some(next) => {
                let from = ordered[position].clone();
                let to = (*next).clone();
                let note = advancement_note(interview, &from, &to);
                AdvancementDecision::Advance { from, to, note }
            }
            None => AdvancementDecision::Skip(SkipReason::AlreadyFinalStage(
                ordered[position].name.clone(),
            )),
        }
    }

    /// Runs the policy for a completed interview. Never fails: errors are
    /// logged and reported as `AdvancementOutcome::Failed`.
    pub async fn apply(&self, interview: &Interview) -> AdvancementOutcome {
        match self.try_apply(interview).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    interview_id = %interview.id,
                    error = ?e,
                    "Automatic stage advancement failed"
                );
                AdvancementOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_apply(&self, interview: &Interview) -> Result<AdvancementOutcome> {
        if let Err(reason) = self.check_eligibility(interview) {
            tracing::debug!(interview_id = %interview.id, reason = %reason, "Stage advancement skipped");
            return Ok(AdvancementOutcome::Skipped(reason));
        }
        let Some(application_id) = interview.job_application_id else {
            return Ok(AdvancementOutcome::Skipped(SkipReason::NoApplication));
        };

        let application = self
            .pipeline
            .get_application(application_id)
            .await
            .map_err(|e| Error::StageAdvancement(format!("Failed to load application: {}", e)))?;
        let stages = self
            .pipeline
            .list_stages(application.job_id)
            .await
            .map_err(|e| Error::StageAdvancement(format!("Failed to load pipeline stages: {}", e)))?;

        match self.decide(interview, &application, &stages) {
            AdvancementDecision::Advance { from, to, note } => {
                self.pipeline
                    .move_application_stage(application.id, to.id, interview.overall_rating, &note)
                    .await
                    .map_err(|e| Error::StageAdvancement(format!("Failed to move application: {}", e)))?;

                tracing::info!(
                    application_id = %application.id,
                    from = %from.name,
                    to = %to.name,
                    "Application advanced to next stage"
                );
                Ok(AdvancementOutcome::Advanced {
                    application_id: application.id,
                    from_stage: from.name,
                    to_stage: to.name,
                })
            }
            AdvancementDecision::Skip(reason) => {
                tracing::debug!(application_id = %application.id, reason = %reason, "Stage advancement skipped");
                Ok(AdvancementOutcome::Skipped(reason))
            }
        }
    }
}

fn advancement_note(interview: &Interview, from: &PipelineStage, to: &PipelineStage) -> String {
    let rating = match interview.overall_rating {
        Some(r) => format!("{}/5", r),
        None => "not rated".to_string(),
    };
    format!(
        "Automatically moved from {} to {} after completing a {} interview (rating: {}).",
        from.name, to.name, interview.interview_type, rating
    )
}
