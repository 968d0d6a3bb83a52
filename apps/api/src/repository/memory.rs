//! In-memory `RecordStore` for pipeline and handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{InsertOutcome, RecordStore, StoreResult};
use crate::models::candidate::{CandidateRow, NewCandidate};
use crate::models::interview::{InterviewRow, NewInterview};
use crate::models::resume::{NewResume, ResumeRow};

#[derive(Default)]
struct Tables {
    next_id: i64,
    fail_next_insert: bool,
    resumes: Vec<ResumeRow>,
    candidates: Vec<CandidateRow>,
    interviews: Vec<InterviewRow>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryRecordStore {
    tables: Mutex<Tables>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a resume row as-is, bypassing the ingestion pipeline.
    pub fn seed_resume(&self, mut row: ResumeRow) -> ResumeRow {
        let mut tables = self.tables.lock().unwrap();
        row.id = tables.next_id();
        tables.resumes.push(row.clone());
        row
    }

    /// The next `insert_resume` fails as if the database rejected it.
    pub fn fail_next_insert(&self) {
        self.tables.lock().unwrap().fail_next_insert = true;
    }

    pub fn seed_candidate(&self, mut row: CandidateRow) -> CandidateRow {
        let mut tables = self.tables.lock().unwrap();
        row.id = tables.next_id();
        tables.candidates.push(row.clone());
        row
    }
}

/// PostgreSQL rejects NUL in `TEXT`; mirror that here.
fn reject_nul<'a>(fields: impl IntoIterator<Item = &'a str>) -> StoreResult<()> {
    if fields.into_iter().any(|f| f.contains('\0')) {
        return Err(sqlx::Error::Protocol(
            "invalid byte sequence for encoding \"UTF8\": 0x00".to_string(),
        ));
    }
    Ok(())
}

fn above(score: Option<f64>, threshold: f64) -> bool {
    score.is_some_and(|s| s > threshold)
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_resume(&self, id: i64) -> StoreResult<Option<ResumeRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.resumes.iter().find(|r| r.id == id).cloned())
    }

    async fn find_resume_by_filename(&self, filename: &str) -> StoreResult<Option<ResumeRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.resumes.iter().find(|r| r.filename == filename).cloned())
    }

    async fn find_resume_by_stored_filename(
        &self,
        stored_filename: &str,
    ) -> StoreResult<Option<ResumeRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .resumes
            .iter()
            .find(|r| r.stored_filename == stored_filename)
            .cloned())
    }

    async fn insert_resume(&self, resume: NewResume) -> StoreResult<InsertOutcome<ResumeRow>> {
        let mut tables = self.tables.lock().unwrap();
        if std::mem::take(&mut tables.fail_next_insert) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        reject_nul([
            resume.filename.as_str(),
            resume.candidate_name.as_str(),
            resume.job_description.as_str(),
            resume.email.as_deref().unwrap_or_default(),
        ])?;
        if tables.resumes.iter().any(|r| r.filename == resume.filename) {
            return Ok(InsertOutcome::Duplicate);
        }
        let row = ResumeRow {
            id: tables.next_id(),
            filename: resume.filename,
            stored_filename: resume.stored_filename,
            candidate_name: resume.candidate_name,
            is_fake: false,
            job_description: resume.job_description,
            score: None,
            explanation: None,
            email: resume.email,
            upload_time: Utc::now(),
        };
        tables.resumes.push(row.clone());
        Ok(InsertOutcome::Inserted(row))
    }

    async fn list_active_resumes(&self) -> StoreResult<Vec<ResumeRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.resumes.iter().filter(|r| !r.is_fake).cloned().collect())
    }

    async fn record_score(
        &self,
        id: i64,
        score: Option<f64>,
        explanation: &str,
        email: Option<&str>,
    ) -> StoreResult<()> {
        reject_nul([explanation, email.unwrap_or_default()])?;
        let mut tables = self.tables.lock().unwrap();
        if let Some(row) = tables.resumes.iter_mut().find(|r| r.id == id) {
            row.score = score;
            row.explanation = Some(explanation.to_string());
            if row.email.as_deref().map_or(true, str::is_empty) {
                if let Some(email) = email {
                    row.email = Some(email.to_string());
                }
            }
        }
        Ok(())
    }

    async fn list_resumes_above(&self, threshold: f64) -> StoreResult<Vec<ResumeRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .resumes
            .iter()
            .filter(|r| !r.is_fake && above(r.score, threshold))
            .cloned()
            .collect())
    }

    async fn delete_resume(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.resumes.len();
        tables.resumes.retain(|r| r.id != id);
        Ok(tables.resumes.len() < before)
    }

    async fn delete_all_resumes(&self) -> StoreResult<Vec<ResumeRow>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(std::mem::take(&mut tables.resumes))
    }

    async fn delete_resumes_above(&self, threshold: f64) -> StoreResult<Vec<ResumeRow>> {
        let mut tables = self.tables.lock().unwrap();
        let (removed, kept): (Vec<ResumeRow>, Vec<ResumeRow>) = std::mem::take(&mut tables.resumes)
            .into_iter()
            .partition(|r| above(r.score, threshold));
        tables.resumes = kept;
        Ok(removed)
    }

    async fn candidate_exists(&self, filename: &str) -> StoreResult<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.candidates.iter().any(|c| c.filename == filename))
    }

    async fn insert_candidate(
        &self,
        candidate: NewCandidate,
    ) -> StoreResult<InsertOutcome<CandidateRow>> {
        let mut tables = self.tables.lock().unwrap();
        if tables.candidates.iter().any(|c| c.filename == candidate.filename) {
            return Ok(InsertOutcome::Duplicate);
        }
        let row = CandidateRow {
            id: tables.next_id(),
            filename: candidate.filename,
            stored_filename: candidate.stored_filename,
            candidate_name: candidate.candidate_name,
            job_description: candidate.job_description,
            score: candidate.score,
            explanation: candidate.explanation,
            email: candidate.email,
            upload_time: Utc::now(),
        };
        tables.candidates.push(row.clone());
        Ok(InsertOutcome::Inserted(row))
    }

    async fn list_candidates(&self) -> StoreResult<Vec<CandidateRow>> {
        Ok(self.tables.lock().unwrap().candidates.clone())
    }

    async fn find_candidate(&self, id: i64) -> StoreResult<Option<CandidateRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn delete_candidates_above(&self, threshold: f64) -> StoreResult<Vec<CandidateRow>> {
        let mut tables = self.tables.lock().unwrap();
        let (removed, kept): (Vec<CandidateRow>, Vec<CandidateRow>) = std::mem::take(&mut tables.candidates)
            .into_iter()
            .partition(|c| above(c.score, threshold));
        tables.candidates = kept;
        Ok(removed)
    }

    async fn insert_interview(&self, interview: NewInterview) -> StoreResult<InterviewRow> {
        let mut tables = self.tables.lock().unwrap();
        let row = InterviewRow {
            id: tables.next_id(),
            candidate_id: interview.candidate_id,
            candidate_name: interview.candidate_name,
            email: interview.email,
            score: interview.score,
            interview_datetime: interview.interview_datetime,
            created_at: Utc::now(),
        };
        tables.interviews.push(row.clone());
        Ok(row)
    }

    async fn list_interviews(&self) -> StoreResult<Vec<InterviewRow>> {
        let mut rows = self.tables.lock().unwrap().interviews.clone();
        rows.sort_by(|a, b| {
            b.interview_datetime
                .cmp(&a.interview_datetime)
                .then(b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn delete_interview(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.interviews.len();
        tables.interviews.retain(|i| i.id != id);
        Ok(tables.interviews.len() < before)
    }
}
