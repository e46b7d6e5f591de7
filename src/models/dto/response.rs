use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{AccessCode, AccessLogEntry};

#[derive(Debug, Clone, Serialize)]
pub struct AccessCodeDto {
    pub id: String,
    pub code: String,
    pub quiz_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub active: bool,
    pub usage_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_usage: Option<i64>,
}

impl From<AccessCode> for AccessCodeDto {
    fn from(code: AccessCode) -> Self {
        AccessCodeDto {
            id: code.id,
            code: code.code,
            quiz_id: code.quiz_id,
            created_at: code.created_at,
            expires_at: code.expires_at,
            active: code.active,
            usage_count: code.usage_count,
            max_usage: code.max_usage,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessLogDto {
    pub code_id: String,
    pub student_id: String,
    pub accessed_at: DateTime<Utc>,
}

impl From<AccessLogEntry> for AccessLogDto {
    fn from(entry: AccessLogEntry) -> Self {
        AccessLogDto {
            code_id: entry.code_id,
            student_id: entry.student_id,
            accessed_at: entry.accessed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccessLogPage {
    pub data: Vec<AccessLogDto>,
    pub total: i64,
}

/// The student-facing quiz view. Built exclusively by the content
/// sanitizer (`services::sanitizer`); carries no correctness markers and
/// no instructor-only metadata, directly or indirectly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentQuiz {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<StudentQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentQuestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub order: i16,
    pub options: Vec<StudentAnswerOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentAnswerOption {
    pub id: String,
    pub text: String,
}
