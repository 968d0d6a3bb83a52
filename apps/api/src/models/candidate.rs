use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::resume::ResumeRow;

/// A resume promoted past the score threshold. Copied, not referenced.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub filename: String,
    pub stored_filename: String,
    pub candidate_name: String,
    pub job_description: String,
    pub score: Option<f64>,
    pub explanation: Option<String>,
    pub email: Option<String>,
    pub upload_time: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub filename: String,
    pub stored_filename: String,
    pub candidate_name: String,
    pub job_description: String,
    pub score: Option<f64>,
    pub explanation: Option<String>,
    pub email: Option<String>,
}

impl NewCandidate {
    /// Snapshot of a stored resume as it currently reads.
    pub fn from_resume(resume: &ResumeRow) -> Self {
        Self {
            filename: resume.filename.clone(),
            stored_filename: resume.stored_filename.clone(),
            candidate_name: resume.candidate_name.clone(),
            job_description: resume.job_description.clone(),
            score: resume.score,
            explanation: resume.explanation.clone(),
            email: resume.email.clone(),
        }
    }
}

/// Row shape returned by `GET /candidates`.
#[derive(Debug, Serialize)]
pub struct CandidateView {
    pub id: i64,
    pub filename: String,
    pub stored_filename: String,
    pub name: String,
    pub job_description: String,
    pub score: Option<f64>,
    pub explanation: Option<String>,
    pub upload_time: DateTime<Utc>,
    pub email: Option<String>,
}

impl From<CandidateRow> for CandidateView {
    fn from(row: CandidateRow) -> Self {
        Self {
            id: row.id,
            filename: row.filename,
            stored_filename: row.stored_filename,
            name: row.candidate_name,
            job_description: row.job_description,
            score: row.score,
            explanation: row.explanation,
            upload_time: row.upload_time,
            email: row.email,
        }
    }
}
