pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

use std::sync::Arc;

use crate::error::Result;
use crate::services::collaborators::{Collaborators, Notifier};
use crate::services::conduct_service::{ConductSession, SessionSettings};
use crate::services::{
    interview_service::InterviewService,
    notification_service::{LogNotifier, WebhookNotifier},
    pipeline_service::PipelineService,
    template_service::TemplateService,
};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub collaborators: Collaborators,
    pub settings: SessionSettings,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let interview_service = Arc::new(InterviewService::new(pool.clone()));
        let notifier: Arc<dyn Notifier> = match WebhookNotifier::from_config(config) {
            Ok(Some(webhook)) => Arc::new(webhook),
            Ok(None) => Arc::new(LogNotifier),
            Err(e) => {
                tracing::warn!(error = ?e, "Notification webhook unavailable; logging notifications instead");
                Arc::new(LogNotifier)
            }
        };

        let collaborators = Collaborators {
            templates: Arc::new(TemplateService::new(pool.clone())),
            interviews: interview_service.clone(),
            progress: interview_service,
            pipeline: Arc::new(PipelineService::new(pool.clone())),
            notifier,
        };

        Self {
            pool,
            collaborators,
            settings: SessionSettings::from_config(config),
        }
    }

    /// Loads the interview and opens a conduct session on it, resuming saved progress if any.
    pub async fn open_session(&self, interview_id: Uuid, template_id: Uuid) -> Result<ConductSession> {
        let interview = self.collaborators.interviews.get_interview(interview_id).await?;
        ConductSession::open(
            self.collaborators.clone(),
            self.settings.clone(),
            interview,
            template_id,
        )
        .await
    }
}
