//! Relational store for resumes, candidates and interviews.

use async_trait::async_trait;

use crate::models::candidate::{CandidateRow, NewCandidate};
use crate::models::interview::{InterviewRow, NewInterview};
use crate::models::resume::{NewResume, ResumeRow};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgRecordStore;

pub type StoreResult<T> = Result<T, sqlx::Error>;

/// Result of an insert guarded by a filename uniqueness constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome<T> {
    Inserted(T),
    /// A row with the same filename already exists; nothing was written.
    Duplicate,
}

/// Carried in `AppState` as `Arc<dyn RecordStore>`.
///
/// Every mutation commits on its own; there are no transactions spanning
/// several calls.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_resume(&self, id: i64) -> StoreResult<Option<ResumeRow>>;
    async fn find_resume_by_filename(&self, filename: &str) -> StoreResult<Option<ResumeRow>>;
    async fn find_resume_by_stored_filename(
        &self,
        stored_filename: &str,
    ) -> StoreResult<Option<ResumeRow>>;
    async fn insert_resume(&self, resume: NewResume) -> StoreResult<InsertOutcome<ResumeRow>>;
    /// Non-fake resumes in upload order.
    async fn list_active_resumes(&self) -> StoreResult<Vec<ResumeRow>>;
    /// Writes score and explanation; `email` is only stored when the resume
    /// has none yet.
    async fn record_score(
        &self,
        id: i64,
        score: Option<f64>,
        explanation: &str,
        email: Option<&str>,
    ) -> StoreResult<()>;
    /// Non-fake resumes with `score > threshold`.
    async fn list_resumes_above(&self, threshold: f64) -> StoreResult<Vec<ResumeRow>>;
    async fn delete_resume(&self, id: i64) -> StoreResult<bool>;
    async fn delete_all_resumes(&self) -> StoreResult<Vec<ResumeRow>>;
    async fn delete_resumes_above(&self, threshold: f64) -> StoreResult<Vec<ResumeRow>>;

    async fn candidate_exists(&self, filename: &str) -> StoreResult<bool>;
    async fn insert_candidate(
        &self,
        candidate: NewCandidate,
    ) -> StoreResult<InsertOutcome<CandidateRow>>;
    async fn list_candidates(&self) -> StoreResult<Vec<CandidateRow>>;
    async fn find_candidate(&self, id: i64) -> StoreResult<Option<CandidateRow>>;
    async fn delete_candidates_above(&self, threshold: f64) -> StoreResult<Vec<CandidateRow>>;

    async fn insert_interview(&self, interview: NewInterview) -> StoreResult<InterviewRow>;
    /// Latest `interview_datetime` first.
    async fn list_interviews(&self) -> StoreResult<Vec<InterviewRow>>;
    async fn delete_interview(&self, id: i64) -> StoreResult<bool>;
}
