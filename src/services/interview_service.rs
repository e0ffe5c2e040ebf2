use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::interview_dto::InterviewUpdateCommand;
use crate::error::Result;
use crate::models::interview::{Interview, InterviewRow};
use crate::models::progress::{ProgressRecord, ProgressRow};
use crate::models::response::ResponseRecord;
use crate::services::collaborators::{InterviewGateway, ProgressStore};

const INTERVIEW_COLUMNS: &str = "id, scheduled_at, duration_minutes, interview_type, stage, status, \
    overall_rating, average_score, result, recommendation, notes, next_steps, template_id, job_application_id";

#[derive(Clone)]
pub struct InterviewService {
    pool: PgPool,
}

impl InterviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewGateway for InterviewService {
    async fn get_interview(&self, interview_id: Uuid) -> Result<Interview> {
        let row = sqlx::query_as::<_, InterviewRow>(&format!(
            "SELECT {} FROM interviews WHERE id = $1",
            INTERVIEW_COLUMNS
        ))
        .bind(interview_id)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn update_interview(
        &self,
        interview_id: Uuid,
        command: InterviewUpdateCommand,
    ) -> Result<Interview> {
        let status = command.target_status();
        tracing::debug!(interview_id = %interview_id, command = command.label(), "Updating interview");
        let row = match command {
            InterviewUpdateCommand::MarkInProgress => {
                sqlx::query_as::<_, InterviewRow>(&format!(
                    "UPDATE interviews SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
                    INTERVIEW_COLUMNS
                ))
                .bind(interview_id)
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?
            }
            InterviewUpdateCommand::SubmitEvaluation {
                result,
                overall_rating,
                average_score,
                notes,
                recommendation,
                next_steps,
            } => {
                sqlx::query_as::<_, InterviewRow>(&format!(
                    r#"
                    UPDATE interviews
                    SET status = $2, result = $3, overall_rating = $4, average_score = $5,
                        notes = $6, recommendation = $7, next_steps = $8, updated_at = NOW()
                    WHERE id = $1
                    RETURNING {}
                    "#,
                    INTERVIEW_COLUMNS
                ))
                .bind(interview_id)
                .bind(status.as_str())
                .bind(result.as_str())
                .bind(overall_rating)
                .bind(average_score)
                .bind(notes)
                .bind(recommendation.as_str())
                .bind(next_steps)
                .fetch_one(&self.pool)
                .await?
            }
        };
        row.try_into()
    }

    async fn create_response(&self, interview_id: Uuid, response: &ResponseRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO interview_responses (
                interview_id, question_id, question_text, question_format, question_order,
                answer, score, notes, time_spent_seconds, flagged
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (interview_id, question_id) DO UPDATE
            SET question_text = EXCLUDED.question_text,
                question_format = EXCLUDED.question_format,
                question_order = EXCLUDED.question_order,
                answer = EXCLUDED.answer,
                score = EXCLUDED.score,
                notes = EXCLUDED.notes,
                time_spent_seconds = EXCLUDED.time_spent_seconds,
                flagged = EXCLUDED.flagged,
                updated_at = NOW()
            "#,
        )
        .bind(interview_id)
        .bind(response.question_id)
        .bind(&response.question_text)
        .bind(response.question_format.as_str())
        .bind(response.question_order)
        .bind(&response.answer)
        .bind(response.score)
        .bind(&response.notes)
        .bind(response.time_spent_seconds)
        .bind(response.flagged)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn refresh_views(&self, interview_id: Uuid) -> Result<()> {
        sqlx::query("SELECT pg_notify('interview_updated', $1)")
            .bind(interview_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for InterviewService {
    async fn save_progress(&self, interview_id: Uuid, record: &ProgressRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO interview_progress (
                interview_id, current_question_index, responses, total_time_spent_seconds, status, saved_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (interview_id) DO UPDATE
            SET current_question_index = EXCLUDED.current_question_index,
                responses = EXCLUDED.responses,
                total_time_spent_seconds = EXCLUDED.total_time_spent_seconds,
                status = EXCLUDED.status,
                saved_at = EXCLUDED.saved_at
            "#,
        )
        .bind(interview_id)
        .bind(record.current_question_index as i32)
        .bind(Json(&record.responses))
        .bind(record.total_time_spent_seconds)
        .bind(record.status.as_str())
        .bind(record.saved_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn load_progress(&self, interview_id: Uuid) -> Result<Option<ProgressRecord>> {
        let row = sqlx::query_as::<_, ProgressRow>(
            r#"
            SELECT interview_id, current_question_index, responses, total_time_spent_seconds, status, saved_at
            FROM interview_progress
            WHERE interview_id = $1
            "#,
        )
        .bind(interview_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProgressRecord::try_from).transpose()
    }
}
