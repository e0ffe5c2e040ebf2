use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::interview_dto::InterviewUpdateCommand;
use crate::error::Result;
use crate::models::interview::Interview;
use crate::models::pipeline::{JobApplication, PipelineStage};
use crate::models::progress::ProgressRecord;
use crate::models::response::ResponseRecord;
use crate::models::template::Template;

#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn load_template(&self, template_id: Uuid) -> Result<Template>;
}

#[async_trait]
pub trait InterviewGateway: Send + Sync {
    async fn get_interview(&self, interview_id: Uuid) -> Result<Interview>;

    async fn update_interview(
        &self,
        interview_id: Uuid,
        command: InterviewUpdateCommand,
    ) -> Result<Interview>;

    async fn create_response(&self, interview_id: Uuid, response: &ResponseRecord) -> Result<()>;

    /// Tells cached views of the interview that it changed.
    async fn refresh_views(&self, interview_id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn save_progress(&self, interview_id: Uuid, record: &ProgressRecord) -> Result<()>;
    async fn load_progress(&self, interview_id: Uuid) -> Result<Option<ProgressRecord>>;
}

#[async_trait]
pub trait PipelineGateway: Send + Sync {
    async fn get_application(&self, application_id: Uuid) -> Result<JobApplication>;
    async fn list_stages(&self, job_id: Uuid) -> Result<Vec<PipelineStage>>;
    async fn move_application_stage(
        &self,
        application_id: Uuid,
        next_stage_id: Uuid,
        rating: Option<i32>,
        note: &str,
    ) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyKind {
    Success,
    Info,
    Warning,
    Error,
}

/// User-facing feedback sink. Nothing it does is observed by the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, kind: NotifyKind, message: &str);
}

#[derive(Clone)]
pub struct Collaborators {
    pub templates: Arc<dyn TemplateSource>,
    pub interviews: Arc<dyn InterviewGateway>,
    pub progress: Arc<dyn ProgressStore>,
    pub pipeline: Arc<dyn PipelineGateway>,
    pub notifier: Arc<dyn Notifier>,
}
