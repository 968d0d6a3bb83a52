use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One uploaded, non-duplicate, non-fake resume.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    /// Original filename as uploaded. Unique.
    pub filename: String,
    /// Content-store key. Never derived from `filename`.
    pub stored_filename: String,
    pub candidate_name: String,
    pub is_fake: bool,
    pub job_description: String,
    pub score: Option<f64>,
    pub explanation: Option<String>,
    pub email: Option<String>,
    pub upload_time: DateTime<Utc>,
}

/// Insert parameters for a freshly ingested resume.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub filename: String,
    pub stored_filename: String,
    pub candidate_name: String,
    pub job_description: String,
    pub email: Option<String>,
}

/// Row shape returned by `GET /parsed-resumes`.
#[derive(Debug, Serialize)]
pub struct ParsedResumeView {
    pub id: i64,
    pub filename: String,
    pub stored_filename: String,
    pub name: String,
    pub score: Option<f64>,
    pub explanation: Option<String>,
    pub upload_time: DateTime<Utc>,
}

impl From<ResumeRow> for ParsedResumeView {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            filename: row.filename,
            stored_filename: row.stored_filename,
            name: row.candidate_name,
            score: row.score,
            explanation: row.explanation,
            upload_time: row.upload_time,
        }
    }
}
