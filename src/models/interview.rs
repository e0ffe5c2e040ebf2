use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;
use crate::models::evaluation::{InterviewResult, Recommendation};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    pub id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    #[serde(rename = "type")]
    pub interview_type: InterviewType,
    pub stage: Option<String>,
    pub status: InterviewStatus,
    pub overall_rating: Option<i32>,
    pub average_score: Option<Decimal>,
    pub result: Option<InterviewResult>,
    pub recommendation: Option<Recommendation>,
    pub notes: Option<String>,
    pub next_steps: Option<String>,
    pub template_id: Option<Uuid>,
    pub job_application_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterviewType {
    #[serde(rename = "Phone Screen")]
    PhoneScreen,
    Technical,
    Behavioral,
    #[serde(rename = "Culture Fit")]
    CultureFit,
    Panel,
    Final,
    Onsite,
    Other,
}

impl InterviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::PhoneScreen => "Phone Screen",
            InterviewType::Technical => "Technical",
            InterviewType::Behavioral => "Behavioral",
            InterviewType::CultureFit => "Culture Fit",
            InterviewType::Panel => "Panel",
            InterviewType::Final => "Final",
            InterviewType::Onsite => "Onsite",
            InterviewType::Other => "Other",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "phone screen" | "phone" => Ok(InterviewType::PhoneScreen),
            "technical" => Ok(InterviewType::Technical),
            "behavioral" => Ok(InterviewType::Behavioral),
            "culture fit" => Ok(InterviewType::CultureFit),
            "panel" => Ok(InterviewType::Panel),
            "final" => Ok(InterviewType::Final),
            "onsite" | "on site" => Ok(InterviewType::Onsite),
            "other" => Ok(InterviewType::Other),
            _ => Err(Error::Validation(format!("Unknown interview type: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
    #[serde(rename = "No Show")]
    NoShow,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "Scheduled",
            InterviewStatus::InProgress => "In Progress",
            InterviewStatus::Completed => "Completed",
            InterviewStatus::Cancelled => "Cancelled",
            InterviewStatus::NoShow => "No Show",
        }
    }
}

impl FromStr for InterviewStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(InterviewStatus::Scheduled),
            "In Progress" => Ok(InterviewStatus::InProgress),
            "Completed" => Ok(InterviewStatus::Completed),
            "Cancelled" => Ok(InterviewStatus::Cancelled),
            "No Show" => Ok(InterviewStatus::NoShow),
            other => Err(Error::Internal(format!("Unknown interview status: {}", other))),
        }
    }
}

/// Raw `interviews` row; enum columns are stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub interview_type: String,
    pub stage: Option<String>,
    pub status: String,
    pub overall_rating: Option<i32>,
    pub average_score: Option<Decimal>,
    pub result: Option<String>,
    pub recommendation: Option<String>,
    pub notes: Option<String>,
    pub next_steps: Option<String>,
    pub template_id: Option<Uuid>,
    pub job_application_id: Option<Uuid>,
}

impl TryFrom<InterviewRow> for Interview {
    type Error = Error;

    fn try_from(row: InterviewRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            scheduled_at: row.scheduled_at,
            duration_minutes: row.duration_minutes,
            interview_type: row.interview_type.parse().unwrap_or(InterviewType::Other),
            stage: row.stage,
            status: row.status.parse()?,
            overall_rating: row.overall_rating,
            average_score: row.average_score,
            result: row.result.as_deref().map(str::parse).transpose()?,
            recommendation: row.recommendation.as_deref().map(str::parse).transpose()?,
            notes: row.notes,
            next_steps: row.next_steps,
            template_id: row.template_id,
            job_application_id: row.job_application_id,
        })
    }
}
