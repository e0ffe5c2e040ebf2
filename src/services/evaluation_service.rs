use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::dto::interview_dto::InterviewUpdateCommand;
use crate::error::{Error, Result};
use crate::models::evaluation::Evaluation;
use crate::models::interview::Interview;
use crate::models::progress::ProgressStatus;
use crate::models::response::QuestionResponse;
use crate::models::session::SessionState;
use crate::models::template::Template;
use crate::services::advancement_service::{AdvancementOutcome, StageAdvancementPolicy};
use crate::services::collaborators::{InterviewGateway, Notifier, NotifyKind};
use crate::services::progress_service::ProgressPersister;
use crate::session::response_store::ResponseStore;

#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub interview: Interview,
    pub responses_persisted: usize,
    pub failed_question_ids: Vec<i32>,
    pub progress_finalized: bool,
    pub advancement: AdvancementOutcome,
}

#[derive(Clone)]
pub struct EvaluationAggregator {
    interviews: Arc<dyn InterviewGateway>,
    progress: ProgressPersister,
    advancement: StageAdvancementPolicy,
    notifier: Arc<dyn Notifier>,
}

impl EvaluationAggregator {
    pub fn new(
        interviews: Arc<dyn InterviewGateway>,
        progress: ProgressPersister,
        advancement: StageAdvancementPolicy,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            interviews,
            progress,
            advancement,
            notifier,
        }
    }

    /// Persists a finished session and its evaluation.
    ///
    /// Steps run strictly in order: precondition, per-response writes (best
    /// effort), progress finalize (surfaced, not fatal), interview update
    /// (fatal), then advancement and view refresh (never fatal). Nothing is
    /// rolled back when a later step fails.
    pub async fn finalize(
        &self,
        interview: &Interview,
        template: &Template,
        session: &SessionState,
        responses: &ResponseStore,
        evaluation: &Evaluation,
    ) -> Result<SubmissionOutcome> {
        if session.start_time.is_none() {
            return Err(Error::Validation("Interview session has not been started".to_string()));
        }

        let records = responses.non_empty_records(template);
        let mut responses_persisted = 0;
        let mut failed_question_ids = Vec::new();
        for record in &records {
            match self.interviews.create_response(interview.id, record).await {
                Ok(()) => responses_persisted += 1,
                Err(e) => {
                    tracing::warn!(
                        interview_id = %interview.id,
                        question_id = record.question_id,
                        error = ?e,
                        "Failed to persist interview response"
                    );
                    failed_question_ids.push(record.question_id);
                }
            }
        }
        if !failed_question_ids.is_empty() {
            self.notifier
                .notify(
                    NotifyKind::Warning,
                    &format!(
                        "{} of {} responses could not be saved",
                        failed_question_ids.len(),
                        records.len()
                    ),
                )
                .await;
        }

        let progress_finalized = match self
            .progress
            .save(
                interview,
                template,
                session,
                responses,
                ProgressStatus::Completed,
                evaluation.completed_at,
            )
            .await
        {
            Ok(_) => true,
            Err(e) => {
                self.notifier
                    .notify(NotifyKind::Warning, &format!("Interview progress was not finalized: {}", e))
                    .await;
                false
            }
        };

        let command = submission_command(&responses.snapshot_all(template), evaluation);
        let updated = match self.interviews.update_interview(interview.id, command).await {
            Ok(updated) => updated,
            Err(e) => {
                tracing::error!(interview_id = %interview.id, error = ?e, "Failed to submit interview evaluation");
                self.notifier
                    .notify(NotifyKind::Error, "Failed to submit evaluation")
                    .await;
                return Err(e.into_persistence("Failed to submit evaluation"));
            }
        };
        tracing::info!(
            interview_id = %interview.id,
            responses_persisted,
            failed = failed_question_ids.len(),
            "Interview evaluation submitted"
        );
        self.notifier
            .notify(NotifyKind::Success, "Interview evaluation submitted")
            .await;

        let advancement = self.advancement.apply(&updated).await;
        if let AdvancementOutcome::Advanced { to_stage, .. } = &advancement {
            self.notifier
                .notify(NotifyKind::Info, &format!("Candidate advanced to {}", to_stage))
                .await;
        }
        if let Err(e) = self.interviews.refresh_views(interview.id).await {
            tracing::warn!(interview_id = %interview.id, error = ?e, "Failed to refresh interview views");
        }

        Ok(SubmissionOutcome {
            interview: updated,
            responses_persisted,
            failed_question_ids,
            progress_finalized,
            advancement,
        })
    }
}

/// Mean of the scores that were given, if any.
pub fn average_score(responses: &[QuestionResponse]) -> Option<f64> {
    let scores: Vec<i32> = responses.iter().filter_map(|r| r.score).collect();
    if scores.is_empty() {
        return None;
    }
    let total: i64 = scores.iter().map(|s| i64::from(*s)).sum();
    Some(total as f64 / scores.len() as f64)
}

pub fn submission_command(
    responses: &[QuestionResponse],
    evaluation: &Evaluation,
) -> InterviewUpdateCommand {
    let average = average_score(responses);
    let overall_rating = evaluation
        .overall_score
        .or_else(|| average.map(|avg| avg.round() as i32));

    InterviewUpdateCommand::SubmitEvaluation {
        result: evaluation.recommendation.result(),
        overall_rating,
        average_score: average
            .and_then(Decimal::from_f64)
            .map(|d| d.round_dp(2)),
        notes: evaluation.compose_notes(),
        recommendation: evaluation.recommendation,
        next_steps: evaluation.next_steps(),
    }
}
