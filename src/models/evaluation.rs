use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongHire,
    Hire,
    NoHire,
    StrongNoHire,
}

impl Recommendation {
    pub const ALL: [Recommendation; 4] = [
        Recommendation::StrongHire,
        Recommendation::Hire,
        Recommendation::NoHire,
        Recommendation::StrongNoHire,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongHire => "strong_hire",
            Recommendation::Hire => "hire",
            Recommendation::NoHire => "no_hire",
            Recommendation::StrongNoHire => "strong_no_hire",
        }
    }

    pub fn result(&self) -> InterviewResult {
        match self {
            Recommendation::StrongHire | Recommendation::Hire => InterviewResult::Pass,
            Recommendation::NoHire | Recommendation::StrongNoHire => InterviewResult::Fail,
        }
    }
}

impl FromStr for Recommendation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strong_hire" => Ok(Recommendation::StrongHire),
            "hire" => Ok(Recommendation::Hire),
            "no_hire" => Ok(Recommendation::NoHire),
            "strong_no_hire" => Ok(Recommendation::StrongNoHire),
            other => Err(Error::Validation(format!("Unknown recommendation: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewResult {
    Pass,
    Fail,
}

impl InterviewResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewResult::Pass => "Pass",
            InterviewResult::Fail => "Fail",
        }
    }
}

impl FromStr for InterviewResult {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pass" => Ok(InterviewResult::Pass),
            "Fail" => Ok(InterviewResult::Fail),
            other => Err(Error::Internal(format!("Unknown interview result: {}", other))),
        }
    }
}

/// The interviewer's final verdict, produced once at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub overall_score: Option<i32>,
    pub recommendation: Recommendation,
    #[serde(default)]
    pub overall_notes: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub next_steps: String,
    pub completed_at: DateTime<Utc>,
}

impl Evaluation {
    /// Notes written to the interview record: overall notes followed by the
    /// strengths, improvement areas and next steps, blank sections omitted.
    pub fn compose_notes(&self) -> String {
        let mut sections: Vec<String> = Vec::new();

        let overall = self.overall_notes.trim();
        if !overall.is_empty() {
            sections.push(overall.to_string());
        }
        if let Some(line) = labelled_list("Strengths", &self.strengths) {
            sections.push(line);
        }
        if let Some(line) = labelled_list("Areas for Improvement", &self.weaknesses) {
            sections.push(line);
        }
        let next_steps = self.next_steps.trim();
        if !next_steps.is_empty() {
            sections.push(format!("Next Steps: {}", next_steps));
        }

        sections.join("\n\n")
    }

    pub fn next_steps(&self) -> Option<String> {
        let trimmed = self.next_steps.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

fn labelled_list(label: &str, items: &[String]) -> Option<String> {
    let entries: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if entries.is_empty() {
        None
    } else {
        Some(format!("{}: {}", label, entries.join(", ")))
    }
}
