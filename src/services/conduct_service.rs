use std::sync::Arc;

use crate::config::Config;
use crate::dto::evaluation_dto::SubmitEvaluationRequest;
use crate::dto::interview_dto::InterviewUpdateCommand;
use crate::error::{Error, Result};
use crate::models::interview::Interview;
use crate::models::progress::{ProgressRecord, ProgressStatus};
use crate::models::session::{SessionState, SessionStatus, SessionSummary};
use crate::models::template::Template;
use crate::services::advancement_service::{AdvancementRules, StageAdvancementPolicy};
use crate::services::collaborators::{Collaborators, NotifyKind};
use crate::services::evaluation_service::{EvaluationAggregator, SubmissionOutcome};
use crate::services::progress_service::ProgressPersister;
use crate::session::{Navigation, SessionController, SessionEffect};
use crate::utils::time::{Clock, SystemClock};

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub autosave_on_navigate: bool,
    pub advancement: AdvancementRules,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            autosave_on_navigate: true,
            advancement: AdvancementRules::default(),
        }
    }
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            autosave_on_navigate: config.progress_autosave,
            advancement: AdvancementRules::from_config(config),
        }
    }
}

/// One interviewer's live pass through a template for a single interview.
///
/// Wraps the pure `SessionController` and carries out the side effects its
/// transitions report. Dropping the session discards anything not yet saved.
pub struct ConductSession {
    interview: Interview,
    controller: SessionController,
    deps: Collaborators,
    progress: ProgressPersister,
    aggregator: EvaluationAggregator,
    clock: Arc<dyn Clock>,
    settings: SessionSettings,
    submitted: bool,
}

impl ConductSession {
    pub async fn open(
        deps: Collaborators,
        settings: SessionSettings,
        interview: Interview,
        template_id: uuid::Uuid,
    ) -> Result<Self> {
        Self::open_with_clock(deps, settings, interview, template_id, Arc::new(SystemClock)).await
    }

    pub async fn open_with_clock(
        deps: Collaborators,
        settings: SessionSettings,
        interview: Interview,
        template_id: uuid::Uuid,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let template = Arc::new(deps.templates.load_template(template_id).await?);
        let progress = ProgressPersister::new(deps.progress.clone());

        let controller = match progress.load(interview.id).await {
            Ok(Some(saved)) => {
                tracing::info!(
                    interview_id = %interview.id,
                    responses = saved.responses.len(),
                    "Resuming interview from saved progress"
                );
                SessionController::restore(template, &saved)
            }
            Ok(None) => SessionController::new(template),
            Err(e) => {
                tracing::warn!(interview_id = %interview.id, error = ?e, "Could not load saved progress; starting fresh");
                SessionController::new(template)
            }
        };

        let advancement =
            StageAdvancementPolicy::new(deps.pipeline.clone(), settings.advancement.clone());
        let aggregator = EvaluationAggregator::new(
            deps.interviews.clone(),
            progress.clone(),
            advancement,
            deps.notifier.clone(),
        );

        Ok(Self {
            interview,
            controller,
            deps,
            progress,
            aggregator,
            clock,
            settings,
            submitted: false,
        })
    }

    pub fn interview(&self) -> &Interview {
        &self.interview
    }

    pub fn template(&self) -> &Template {
        self.controller.template()
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn state(&self) -> SessionState {
        self.controller.state(self.clock.now())
    }

    /// Whether an evaluation has been written onto the interview.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn summary(&self) -> SessionSummary {
        self.controller.summary()
    }

    /// Elapsed seconds for the on-screen counter.
    pub fn tick(&self) -> i64 {
        self.controller.tick(self.clock.now())
    }

    pub async fn start(&mut self) -> SessionState {
        let effects = self.controller.start(self.clock.now());
        self.run_effects(&effects).await;
        self.state()
    }

    pub async fn pause(&mut self) -> SessionState {
        let effects = self.controller.pause(self.clock.now());
        self.run_effects(&effects).await;
        self.state()
    }

    pub async fn resume(&mut self) -> SessionState {
        let effects = self.controller.resume(self.clock.now());
        self.run_effects(&effects).await;
        self.state()
    }

    pub async fn complete(&mut self) -> SessionState {
        let effects = self.controller.complete(self.clock.now());
        self.run_effects(&effects).await;
        self.state()
    }

    pub async fn go_to(&mut self, index: usize) -> Navigation {
        let nav = self.controller.go_to(index, self.clock.now());
        self.after_navigation(nav).await
    }

    pub async fn next(&mut self) -> Navigation {
        let nav = self.controller.next(self.clock.now());
        self.after_navigation(nav).await
    }

    pub async fn previous(&mut self) -> Navigation {
        let nav = self.controller.previous(self.clock.now());
        self.after_navigation(nav).await
    }

    pub fn record_answer(&mut self, answer: &str) {
        self.controller.record_answer(answer);
    }

    pub fn record_score(&mut self, score: Option<i32>) -> Result<()> {
        self.controller.record_score(score)
    }

    pub fn record_notes(&mut self, notes: &str) {
        self.controller.record_notes(notes);
    }

    pub fn toggle_flag(&mut self) -> bool {
        self.controller.toggle_flag()
    }

    /// Explicit partial save; the error is returned so the caller can retry.
    pub async fn save_progress(&self) -> Result<ProgressRecord> {
        let now = self.clock.now();
        let result = self
            .progress
            .save(
                &self.interview,
                self.controller.template(),
                &self.controller.state(now),
                self.controller.responses(),
                ProgressStatus::InProgress,
                now,
            )
            .await;
        match &result {
            Ok(_) => self.deps.notifier.notify(NotifyKind::Success, "Progress saved").await,
            Err(_) => {
                self.deps
                    .notifier
                    .notify(NotifyKind::Error, "Failed to save progress")
                    .await
            }
        }
        result
    }

    /// Validates the evaluation, completes the session if still running and
    /// hands everything to the aggregator. Accepted once; a failed attempt may be retried.
    pub async fn submit_evaluation(
        &mut self,
        request: SubmitEvaluationRequest,
    ) -> Result<SubmissionOutcome> {
        if self.submitted {
            tracing::warn!(interview_id = %self.interview.id, "Rejected repeat evaluation submission");
            return Err(Error::Validation("evaluation already submitted".to_string()));
        }

        let now = self.clock.now();
        let evaluation = match request.into_evaluation(now) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                self.deps.notifier.notify(NotifyKind::Error, &e.to_string()).await;
                return Err(e);
            }
        };

        if self.controller.status() != SessionStatus::Completed {
            self.controller.complete(now);
        }

        let outcome = self
            .aggregator
            .finalize(
                &self.interview,
                self.controller.template(),
                &self.controller.state(now),
                self.controller.responses(),
                &evaluation,
            )
            .await;

        if let Err(e) = &outcome {
            if e.is_validation() {
                self.deps.notifier.notify(NotifyKind::Error, &e.to_string()).await;
            }
        }
        let outcome = outcome?;
        self.submitted = true;
        self.interview = outcome.interview.clone();
        Ok(outcome)
    }

    async fn after_navigation(&mut self, nav: Navigation) -> Navigation {
        match nav {
            Navigation::Moved { .. } if self.settings.autosave_on_navigate => {
                self.run_effects(&[SessionEffect::SaveProgress]).await;
            }
            Navigation::ReadyToEvaluate => {
                self.run_effects(&[SessionEffect::ReadyToEvaluate]).await;
            }
            _ => {}
        }
        nav
    }

    async fn run_effects(&mut self, effects: &[SessionEffect]) {
        for effect in effects {
            match effect {
                SessionEffect::MarkInProgress => self.mark_in_progress().await,
                SessionEffect::SaveProgress => self.autosave().await,
                SessionEffect::ReadyToEvaluate => {
                    tracing::info!(interview_id = %self.interview.id, "Interview ready for evaluation");
                }
            }
        }
    }

    async fn mark_in_progress(&mut self) {
        match self
            .deps
            .interviews
            .update_interview(self.interview.id, InterviewUpdateCommand::MarkInProgress)
            .await
        {
            Ok(updated) => {
                tracing::info!(interview_id = %self.interview.id, "Interview marked in progress");
                self.interview = updated;
            }
            Err(e) => {
                tracing::warn!(interview_id = %self.interview.id, error = ?e, "Failed to mark interview in progress");
                self.deps
                    .notifier
                    .notify(NotifyKind::Warning, "Could not update interview status")
                    .await;
            }
        }
    }

    async fn autosave(&self) {
        let now = self.clock.now();
        if let Err(e) = self
            .progress
            .save(
                &self.interview,
                self.controller.template(),
                &self.controller.state(now),
                self.controller.responses(),
                ProgressStatus::InProgress,
                now,
            )
            .await
        {
            tracing::warn!(interview_id = %self.interview.id, error = ?e, "Autosave failed; continuing session");
        }
    }
}
