use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub current_stage: String,
    pub current_stage_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PipelineStage {
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    #[sqlx(rename = "stage_order")]
    pub order: i32,
}

impl PipelineStage {
    /// Case-insensitive substring match in either direction.
    pub fn matches_name(&self, stage_name: &str) -> bool {
        let wanted = stage_name.trim().to_lowercase();
        let own = self.name.trim().to_lowercase();
        if wanted.is_empty() || own.is_empty() {
            return false;
        }
        own.contains(&wanted) || wanted.contains(&own)
    }
}
