use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::question::{question_key, Question};

/// Ordered question list consumed read-only by a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub questions: Vec<Question>,
}

impl Template {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn key_at(&self, index: usize) -> Option<i32> {
        self.questions.get(index).map(|q| question_key(q, index))
    }

    /// Questions paired with their response keys, in template order.
    pub fn keyed_questions(&self) -> impl Iterator<Item = (i32, &Question)> {
        self.questions
            .iter()
            .enumerate()
            .map(|(idx, q)| (question_key(q, idx), q))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TemplateRow {
    pub id: Uuid,
    pub name: String,
    pub questions: Json<Vec<Question>>,
}

impl From<TemplateRow> for Template {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            questions: row.questions.0,
        }
    }
}
