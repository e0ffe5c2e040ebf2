#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use interview_conduct::dto::interview_dto::InterviewUpdateCommand;
use interview_conduct::error::{Error, Result};
use interview_conduct::models::interview::{Interview, InterviewStatus, InterviewType};
use interview_conduct::models::pipeline::{JobApplication, PipelineStage};
use interview_conduct::models::progress::ProgressRecord;
use interview_conduct::models::question::{Question, QuestionFormat};
use interview_conduct::models::response::ResponseRecord;
use interview_conduct::models::template::Template;
use interview_conduct::services::collaborators::{
    Collaborators, InterviewGateway, Notifier, NotifyKind, PipelineGateway, ProgressStore,
    TemplateSource,
};
use interview_conduct::utils::time::Clock;

/// Failure switches for the in-memory backend.
#[derive(Debug, Default)]
pub struct Failures {
    pub response_ids: HashSet<i32>,
    pub mark_in_progress: bool,
    pub submit: bool,
    pub save_progress: bool,
    pub load_progress: bool,
    pub move_stage: bool,
}

/// In-memory stand-in for every collaborator, recording each call in order.
#[derive(Default)]
pub struct Backend {
    pub calls: Mutex<Vec<String>>,
    pub failures: Mutex<Failures>,
    pub templates: Mutex<Vec<Template>>,
    pub interview: Mutex<Option<Interview>>,
    pub progress: Mutex<Option<ProgressRecord>>,
    pub progress_saves: Mutex<Vec<ProgressRecord>>,
    pub responses: Mutex<Vec<ResponseRecord>>,
    pub applications: Mutex<Vec<JobApplication>>,
    pub stages: Mutex<Vec<PipelineStage>>,
    pub moves: Mutex<Vec<(Uuid, Uuid, Option<i32>, String)>>,
    pub notifications: Mutex<Vec<(NotifyKind, String)>>,
}

impl Backend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators {
            templates: self.clone(),
            interviews: self.clone(),
            progress: self.clone(),
            pipeline: self.clone(),
            notifier: self.clone(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls minus the reads.
    pub fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| {
                !c.starts_with("load_") && !c.starts_with("get_") && !c.starts_with("list_")
            })
            .collect()
    }

    pub fn notifications_of(&self, kind: NotifyKind) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn fail(&self, edit: impl FnOnce(&mut Failures)) {
        edit(&mut self.failures.lock().unwrap());
    }

    pub fn add_template(&self, template: Template) {
        self.templates.lock().unwrap().push(template);
    }

    pub fn set_interview(&self, interview: Interview) {
        *self.interview.lock().unwrap() = Some(interview);
    }

    pub fn application_stage(&self, application_id: Uuid) -> Option<String> {
        self.applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == application_id)
            .map(|a| a.current_stage.clone())
    }

    pub fn stored_interview(&self) -> Interview {
        self.interview.lock().unwrap().clone().expect("interview stored")
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl TemplateSource for Backend {
    async fn load_template(&self, template_id: Uuid) -> Result<Template> {
        self.record("load_template");
        self.templates
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == template_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Interview template {} not found", template_id)))
    }
}

#[async_trait]
impl InterviewGateway for Backend {
    async fn get_interview(&self, interview_id: Uuid) -> Result<Interview> {
        self.record("get_interview");
        self.interview
            .lock()
            .unwrap()
            .clone()
            .filter(|i| i.id == interview_id)
            .ok_or_else(|| Error::NotFound("Interview not found".into()))
    }

    async fn update_interview(
        &self,
        interview_id: Uuid,
        command: InterviewUpdateCommand,
    ) -> Result<Interview> {
        self.record(format!("update_interview:{}", command.label()));
        {
            let failures = self.failures.lock().unwrap();
            let failing = match command {
                InterviewUpdateCommand::MarkInProgress => failures.mark_in_progress,
                _ => failures.submit,
            };
            if failing {
                return Err(Error::Internal("database unavailable".into()));
            }
        }

        let mut guard = self.interview.lock().unwrap();
        let interview = guard
            .as_mut()
            .filter(|i| i.id == interview_id)
            .ok_or_else(|| Error::NotFound("Interview not found".into()))?;
        interview.status = command.target_status();
        if let InterviewUpdateCommand::SubmitEvaluation {
            result,
            overall_rating,
            average_score,
            notes,
            recommendation,
            next_steps,
        } = command
        {
            interview.result = Some(result);
            interview.overall_rating = overall_rating;
            interview.average_score = average_score;
            interview.notes = Some(notes);
            interview.recommendation = Some(recommendation);
            interview.next_steps = next_steps;
        }
        Ok(interview.clone())
    }

    async fn create_response(&self, _interview_id: Uuid, response: &ResponseRecord) -> Result<()> {
        self.record(format!("create_response:{}", response.question_id));
        if self
            .failures
            .lock()
            .unwrap()
            .response_ids
            .contains(&response.question_id)
        {
            return Err(Error::Internal("insert failed".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        responses.retain(|r| r.question_id != response.question_id);
        responses.push(response.clone());
        Ok(())
    }

    async fn refresh_views(&self, _interview_id: Uuid) -> Result<()> {
        self.record("refresh_views");
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for Backend {
    async fn save_progress(&self, _interview_id: Uuid, record: &ProgressRecord) -> Result<()> {
        self.record(format!("save_progress:{}", record.status.as_str()));
        if self.failures.lock().unwrap().save_progress {
            return Err(Error::Internal("progress table locked".into()));
        }
        *self.progress.lock().unwrap() = Some(record.clone());
        self.progress_saves.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn load_progress(&self, _interview_id: Uuid) -> Result<Option<ProgressRecord>> {
        self.record("load_progress");
        if self.failures.lock().unwrap().load_progress {
            return Err(Error::Internal("progress table locked".into()));
        }
        Ok(self.progress.lock().unwrap().clone())
    }
}

#[async_trait]
impl PipelineGateway for Backend {
    async fn get_application(&self, application_id: Uuid) -> Result<JobApplication> {
        self.record("get_application");
        self.applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == application_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Job application not found".into()))
    }

    async fn list_stages(&self, job_id: Uuid) -> Result<Vec<PipelineStage>> {
        self.record("list_stages");
        Ok(self
            .stages
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn move_application_stage(
        &self,
        application_id: Uuid,
        next_stage_id: Uuid,
        rating: Option<i32>,
        note: &str,
    ) -> Result<()> {
        self.record("move_application_stage");
        if self.failures.lock().unwrap().move_stage {
            return Err(Error::Internal("pipeline service down".into()));
        }
        let next_stage = self
            .stages
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == next_stage_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Pipeline stage not found".into()))?;
        let mut applications = self.applications.lock().unwrap();
        let application = applications
            .iter_mut()
            .find(|a| a.id == application_id)
            .ok_or_else(|| Error::NotFound("Job application not found".into()))?;
        application.current_stage = next_stage.name;
        application.current_stage_id = Some(next_stage.id);
        self.moves
            .lock()
            .unwrap()
            .push((application_id, next_stage_id, rating, note.to_string()));
        Ok(())
    }
}

#[async_trait]
impl Notifier for Backend {
    async fn notify(&self, kind: NotifyKind, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((kind, message.to_string()));
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Utc::now()),
        })
    }

    pub fn advance(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap();
        *now = *now + Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn template(questions: usize) -> Template {
    Template {
        id: Uuid::new_v4(),
        name: "Backend engineer screen".into(),
        questions: (0..questions)
            .map(|i| Question {
                question: format!("Question {}", i + 1),
                format: QuestionFormat::RatingJustification,
                order: None,
                rating_scale: None,
                max_characters: None,
                scoring_criteria: None,
            })
            .collect(),
    }
}

pub fn interview(kind: InterviewType, template_id: Uuid) -> Interview {
    Interview {
        id: Uuid::new_v4(),
        scheduled_at: Utc::now(),
        duration_minutes: 45,
        interview_type: kind,
        stage: Some("Technical".into()),
        status: InterviewStatus::Scheduled,
        overall_rating: None,
        average_score: None,
        result: None,
        recommendation: None,
        notes: None,
        next_steps: None,
        template_id: Some(template_id),
        job_application_id: None,
    }
}

/// Seeds a three-stage pipeline and an application sitting in `current_stage`.
pub fn seed_pipeline(backend: &Backend, current_stage: &str) -> (Uuid, Vec<PipelineStage>) {
    let job_id = Uuid::new_v4();
    let stages: Vec<PipelineStage> = [("Screening", 1), ("Technical", 2), ("Final", 3)]
        .into_iter()
        .map(|(name, order)| PipelineStage {
            id: Uuid::new_v4(),
            job_id,
            name: name.to_string(),
            order,
        })
        .collect();
    let application = JobApplication {
        id: Uuid::new_v4(),
        job_id,
        current_stage: current_stage.to_string(),
        current_stage_id: None,
    };
    let application_id = application.id;
    backend.applications.lock().unwrap().push(application);
    backend.stages.lock().unwrap().extend(stages.clone());
    (application_id, stages)
}
