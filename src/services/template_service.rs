use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::template::{Template, TemplateRow};
use crate::services::collaborators::TemplateSource;

#[derive(Clone)]
pub struct TemplateService {
    pool: PgPool,
}

impl TemplateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateSource for TemplateService {
    async fn load_template(&self, template_id: Uuid) -> Result<Template> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r#"SELECT id, name, questions FROM interview_templates WHERE id = $1"#,
        )
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Interview template {} not found", template_id)))?;

        Ok(row.into())
    }
}
