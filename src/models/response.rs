use serde::{Deserialize, Serialize};

use crate::models::question::{Question, QuestionFormat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question_id: i32,
    #[serde(default)]
    pub answer: String,
    pub score: Option<i32>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub time_spent_seconds: i64,
    #[serde(default)]
    pub flagged: bool,
}

impl QuestionResponse {
    /// Zero-value entry standing in for an unanswered question.
    pub fn placeholder(question_id: i32) -> Self {
        Self {
            question_id,
            answer: String::new(),
            score: None,
            notes: String::new(),
            time_spent_seconds: 0,
            flagged: false,
        }
    }

    /// Whether the interviewer captured anything worth persisting.
    pub fn has_content(&self) -> bool {
        !self.answer.trim().is_empty() || self.score.is_some() || !self.notes.trim().is_empty()
    }
}

/// A response denormalized with its question, as written to durable storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub question_id: i32,
    pub question_text: String,
    pub question_format: QuestionFormat,
    pub question_order: i32,
    pub answer: String,
    pub score: Option<i32>,
    pub notes: String,
    pub time_spent_seconds: i64,
    pub flagged: bool,
}

impl ResponseRecord {
    pub fn new(question: &Question, response: QuestionResponse) -> Self {
        Self {
            question_id: response.question_id,
            question_text: question.question.clone(),
            question_format: question.format,
            question_order: response.question_id,
            answer: response.answer,
            score: response.score,
            notes: response.notes,
            time_spent_seconds: response.time_spent_seconds,
            flagged: response.flagged,
        }
    }

    pub fn to_response(&self) -> QuestionResponse {
        QuestionResponse {
            question_id: self.question_id,
            answer: self.answer.clone(),
            score: self.score,
            notes: self.notes.clone(),
            time_spent_seconds: self.time_spent_seconds,
            flagged: self.flagged,
        }
    }
}
