use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: i64,
    /// Soft reference to `candidates.id`; not enforced on delete.
    pub candidate_id: i64,
    pub candidate_name: String,
    pub email: String,
    pub score: Option<f64>,
    pub interview_datetime: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInterview {
    pub candidate_id: i64,
    pub candidate_name: String,
    pub email: String,
    pub score: Option<f64>,
    pub interview_datetime: String,
}

/// Row shape returned by `GET /interviews`.
#[derive(Debug, Serialize)]
pub struct InterviewView {
    pub id: i64,
    pub candidate_name: String,
    pub email: String,
    pub score: Option<f64>,
    pub interview_datetime: String,
}

impl From<InterviewRow> for InterviewView {
    fn from(row: InterviewRow) -> Self {
        Self {
            id: row.id,
            candidate_name: row.candidate_name,
            email: row.email,
            score: row.score,
            interview_datetime: row.interview_datetime,
        }
    }
}
