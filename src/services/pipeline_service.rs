use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::pipeline::{JobApplication, PipelineStage};
use crate::services::collaborators::PipelineGateway;

#[derive(Clone)]
pub struct PipelineService {
    pool: PgPool,
}

impl PipelineService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PipelineGateway for PipelineService {
    async fn get_application(&self, application_id: Uuid) -> Result<JobApplication> {
        let application = sqlx::query_as::<_, JobApplication>(
            r#"SELECT id, job_id, current_stage, current_stage_id FROM job_applications WHERE id = $1"#,
        )
        .bind(application_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    async fn list_stages(&self, job_id: Uuid) -> Result<Vec<PipelineStage>> {
        let stages = sqlx::query_as::<_, PipelineStage>(
            r#"
            SELECT id, job_id, name, stage_order
            FROM pipeline_stages
            WHERE job_id = $1
            ORDER BY stage_order ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stages)
    }

    async fn move_application_stage(
        &self,
        application_id: Uuid,
        next_stage_id: Uuid,
        rating: Option<i32>,
        note: &str,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let previous: Option<String> = sqlx::query_scalar(
            r#"SELECT current_stage FROM job_applications WHERE id = $1 FOR UPDATE"#,
        )
        .bind(application_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(previous) = previous else {
            return Err(Error::NotFound(format!("Job application {} not found", application_id)));
        };

        let next_name: String = sqlx::query_scalar(r#"SELECT name FROM pipeline_stages WHERE id = $1"#)
            .bind(next_stage_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE job_applications
            SET current_stage = $2, current_stage_id = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(application_id)
        .bind(&next_name)
        .bind(next_stage_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO application_stage_history (application_id, from_stage, to_stage, rating, note)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(application_id)
        .bind(previous)
        .bind(next_name)
        .bind(rating)
        .bind(note)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
