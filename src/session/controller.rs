use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::progress::ProgressRecord;
use crate::models::session::{SessionState, SessionStatus, SessionSummary};
use crate::models::template::Template;
use crate::session::response_store::ResponseStore;
use crate::session::timer::SessionTimer;
use crate::utils::time::elapsed_between;
use crate::utils::validation::ensure_score_in_scale;

/// I/O a transition asks the driver to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    MarkInProgress,
    SaveProgress,
    ReadyToEvaluate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved { from: usize, to: usize },
    Ignored,
    ReadyToEvaluate,
}

/// State machine for one conduct session. Performs no I/O: every transition
/// takes the current time explicitly and reports the side effects it needs.
#[derive(Debug, Clone)]
pub struct SessionController {
    template: Arc<Template>,
    status: SessionStatus,
    current_index: usize,
    start_time: Option<DateTime<Utc>>,
    timer: SessionTimer,
    responses: ResponseStore,
    question_started_at: Option<DateTime<Utc>>,
}

impl SessionController {
    pub fn new(template: Arc<Template>) -> Self {
        Self {
            template,
            status: SessionStatus::NotStarted,
            current_index: 0,
            start_time: None,
            timer: SessionTimer::new(),
            responses: ResponseStore::new(),
            question_started_at: None,
        }
    }

    /// Seeds a not-yet-started session from a saved progress record.
    pub fn restore(template: Arc<Template>, progress: &ProgressRecord) -> Self {
        let last = template.len().saturating_sub(1);
        Self {
            current_index: progress.current_question_index.min(last),
            timer: SessionTimer::with_accumulated(progress.total_time_spent_seconds),
            responses: ResponseStore::restore(&progress.responses),
            ..Self::new(template)
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_key(&self) -> Option<i32> {
        self.template.key_at(self.current_index)
    }

    pub fn responses(&self) -> &ResponseStore {
        &self.responses
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.template.len()
    }

    pub fn state(&self, now: DateTime<Utc>) -> SessionState {
        SessionState {
            status: self.status,
            current_question_index: self.current_index,
            start_time: self.start_time,
            total_time_spent_seconds: self.timer.elapsed(now),
        }
    }

    pub fn tick(&self, now: DateTime<Utc>) -> i64 {
        self.timer.tick(now)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total_questions: self.template.len(),
            answered: self.responses.answered_count(&self.template),
            flagged: self.responses.flagged_count(&self.template),
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Vec<SessionEffect> {
        if self.status != SessionStatus::NotStarted {
            return Vec::new();
        }
        self.status = SessionStatus::InProgress;
        self.start_time = Some(now);
        self.timer.start(now);
        self.question_started_at = Some(now);
        vec![SessionEffect::MarkInProgress]
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Vec<SessionEffect> {
        if self.status != SessionStatus::InProgress {
            return Vec::new();
        }
        self.commit_question_time(now);
        self.question_started_at = None;
        self.timer.pause(now);
        self.status = SessionStatus::Paused;
        vec![SessionEffect::SaveProgress]
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> Vec<SessionEffect> {
        if self.status != SessionStatus::Paused {
            return Vec::new();
        }
        self.timer.resume(now);
        self.question_started_at = Some(now);
        self.status = SessionStatus::InProgress;
        Vec::new()
    }

    /// Ends the session from any started state; the timer is frozen.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Vec<SessionEffect> {
        match self.status {
            SessionStatus::InProgress | SessionStatus::Paused => {
                self.commit_question_time(now);
                self.question_started_at = None;
                self.timer.pause(now);
                self.status = SessionStatus::Completed;
                vec![SessionEffect::ReadyToEvaluate]
            }
            SessionStatus::NotStarted | SessionStatus::Completed => Vec::new(),
        }
    }

    pub fn go_to(&mut self, index: usize, now: DateTime<Utc>) -> Navigation {
        if index >= self.template.len() {
            return Navigation::Ignored;
        }
        let from = self.current_index;
        self.commit_question_time(now);
        self.current_index = index;
        Navigation::Moved { from, to: index }
    }

    /// Advances one question; on the last question the session completes instead.
    pub fn next(&mut self, now: DateTime<Utc>) -> Navigation {
        if self.template.is_empty() {
            return Navigation::Ignored;
        }
        if self.is_last_question() {
            match self.status {
                SessionStatus::Completed => {}
                SessionStatus::NotStarted => return Navigation::Ignored,
                SessionStatus::InProgress | SessionStatus::Paused => {
                    self.complete(now);
                }
            }
            return Navigation::ReadyToEvaluate;
        }
        self.go_to(self.current_index + 1, now)
    }

    pub fn previous(&mut self, now: DateTime<Utc>) -> Navigation {
        match self.current_index.checked_sub(1) {
            Some(index) => self.go_to(index, now),
            None => Navigation::Ignored,
        }
    }

    pub fn record_answer(&mut self, answer: &str) {
        let Some(key) = self.current_key() else { return };
        let answer: String = match self
            .template
            .question(self.current_index)
            .and_then(|q| q.max_characters)
        {
            Some(limit) => answer.chars().take(limit).collect(),
            None => answer.to_string(),
        };
        self.responses.update(key, |r| r.answer = answer);
    }

    pub fn record_score(&mut self, score: Option<i32>) -> Result<()> {
        let (key, question) = match (self.current_key(), self.template.question(self.current_index)) {
            (Some(key), Some(question)) => (key, question),
            _ => return Err(Error::Validation("Template has no questions".to_string())),
        };
        if let Some(value) = score {
            ensure_score_in_scale(value, question.rating_scale())?;
        }
        self.responses.update(key, |r| r.score = score);
        Ok(())
    }

    pub fn record_notes(&mut self, notes: &str) {
        let Some(key) = self.current_key() else { return };
        self.responses.update(key, |r| r.notes = notes.to_string());
    }

    pub fn toggle_flag(&mut self) -> bool {
        let Some(key) = self.current_key() else { return false };
        self.responses.update(key, |r| r.flagged = !r.flagged);
        self.responses.get(key).map(|r| r.flagged).unwrap_or(false)
    }

    fn commit_question_time(&mut self, now: DateTime<Utc>) {
        let Some(started) = self.question_started_at else { return };
        if let Some(key) = self.current_key() {
            self.responses.add_time(key, elapsed_between(started, now));
        }
        self.question_started_at = Some(now);
    }
}
