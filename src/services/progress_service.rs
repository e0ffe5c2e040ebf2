use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::error::Result;
use crate::models::interview::Interview;
use crate::models::progress::{ProgressRecord, ProgressStatus};
use crate::models::session::SessionState;
use crate::models::template::Template;
use crate::services::collaborators::ProgressStore;
use crate::session::response_store::ResponseStore;

#[derive(Clone)]
pub struct ProgressPersister {
    store: Arc<dyn ProgressStore>,
}

impl ProgressPersister {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    pub fn build_record(
        interview: &Interview,
        template: &Template,
        session: &SessionState,
        responses: &ResponseStore,
        status: ProgressStatus,
        saved_at: DateTime<Utc>,
    ) -> ProgressRecord {
        ProgressRecord {
            interview_id: interview.id,
            current_question_index: session.current_question_index,
            responses: responses.non_empty_records(template),
            total_time_spent_seconds: session.total_time_spent_seconds,
            status,
            saved_at,
        }
    }

    /// Writes a progress snapshot. Session state is never touched, so a failed
    /// save can simply be retried.
    pub async fn save(
        &self,
        interview: &Interview,
        template: &Template,
        session: &SessionState,
        responses: &ResponseStore,
        status: ProgressStatus,
        saved_at: DateTime<Utc>,
    ) -> Result<ProgressRecord> {
        let record = Self::build_record(interview, template, session, responses, status, saved_at);

        match self.store.save_progress(interview.id, &record).await {
            Ok(()) => {
                tracing::debug!(
                    interview_id = %interview.id,
                    responses = record.responses.len(),
                    status = record.status.as_str(),
                    "Interview progress saved"
                );
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(interview_id = %interview.id, error = ?e, "Failed to save interview progress");
                Err(e.into_persistence("Failed to save interview progress"))
            }
        }
    }

    pub async fn load(&self, interview_id: uuid::Uuid) -> Result<Option<ProgressRecord>> {
        self.store.load_progress(interview_id).await
    }
}
