use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "text")]
    pub question: String,
    pub format: QuestionFormat,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub rating_scale: Option<i32>,
    #[serde(default)]
    pub max_characters: Option<usize>,
    #[serde(default)]
    pub scoring_criteria: Option<String>,
}

impl Question {
    pub fn rating_scale(&self) -> i32 {
        self.rating_scale.filter(|scale| *scale > 0).unwrap_or(DEFAULT_RATING_SCALE)
    }
}

pub const DEFAULT_RATING_SCALE: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionFormat {
    YesNoJustification,
    RatingJustification,
    ShortText,
    LongText,
}

impl QuestionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionFormat::YesNoJustification => "yes_no_justification",
            QuestionFormat::RatingJustification => "rating_justification",
            QuestionFormat::ShortText => "short_text",
            QuestionFormat::LongText => "long_text",
        }
    }
}

/// Join key between a question and its response: the explicit `order` when the
/// template sets one, otherwise the 1-based position.
///
/// Keys shift if a template's questions are reordered after responses were
/// captured; stored responses are not reconciled.
pub fn question_key(question: &Question, index: usize) -> i32 {
    question.order.unwrap_or((index as i32) + 1)
}
