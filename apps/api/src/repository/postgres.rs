use async_trait::async_trait;
use sqlx::PgPool;

use super::{InsertOutcome, RecordStore, StoreResult};
use crate::models::candidate::{CandidateRow, NewCandidate};
use crate::models::interview::{InterviewRow, NewInterview};
use crate::models::resume::{NewResume, ResumeRow};

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_resume(&self, id: i64) -> StoreResult<Option<ResumeRow>> {
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_resume_by_filename(&self, filename: &str) -> StoreResult<Option<ResumeRow>> {
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE filename = $1")
            .bind(filename)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_resume_by_stored_filename(
        &self,
        stored_filename: &str,
    ) -> StoreResult<Option<ResumeRow>> {
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE stored_filename = $1")
            .bind(stored_filename)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert_resume(&self, resume: NewResume) -> StoreResult<InsertOutcome<ResumeRow>> {
        // The unique constraint on filename is the real duplicate guard;
        // callers' pre-checks can race.
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes
                (filename, stored_filename, candidate_name, is_fake, job_description, email)
            VALUES ($1, $2, $3, FALSE, $4, $5)
            ON CONFLICT (filename) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&resume.filename)
        .bind(&resume.stored_filename)
        .bind(&resume.candidate_name)
        .bind(&resume.job_description)
        .bind(&resume.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map_or(InsertOutcome::Duplicate, InsertOutcome::Inserted))
    }

    async fn list_active_resumes(&self) -> StoreResult<Vec<ResumeRow>> {
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE is_fake = FALSE ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    async fn record_score(
        &self,
        id: i64,
        score: Option<f64>,
        explanation: &str,
        email: Option<&str>,
    ) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE resumes
            SET score = $2,
                explanation = $3,
                email = COALESCE(NULLIF(email, ''), $4)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(score)
        .bind(explanation)
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_resumes_above(&self, threshold: f64) -> StoreResult<Vec<ResumeRow>> {
        sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE is_fake = FALSE AND score IS NOT NULL AND score > $1 ORDER BY id",
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_resume(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_resumes(&self) -> StoreResult<Vec<ResumeRow>> {
        sqlx::query_as::<_, ResumeRow>("DELETE FROM resumes RETURNING *")
            .fetch_all(&self.pool)
            .await
    }

    async fn delete_resumes_above(&self, threshold: f64) -> StoreResult<Vec<ResumeRow>> {
        sqlx::query_as::<_, ResumeRow>(
            "DELETE FROM resumes WHERE score IS NOT NULL AND score > $1 RETURNING *",
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await
    }

    async fn candidate_exists(&self, filename: &str) -> StoreResult<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM candidates WHERE filename = $1)")
            .bind(filename)
            .fetch_one(&self.pool)
            .await
    }

    async fn insert_candidate(
        &self,
        candidate: NewCandidate,
    ) -> StoreResult<InsertOutcome<CandidateRow>> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            INSERT INTO candidates
                (filename, stored_filename, candidate_name, job_description,
                 score, explanation, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (filename) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&candidate.filename)
        .bind(&candidate.stored_filename)
        .bind(&candidate.candidate_name)
        .bind(&candidate.job_description)
        .bind(candidate.score)
        .bind(&candidate.explanation)
        .bind(&candidate.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map_or(InsertOutcome::Duplicate, InsertOutcome::Inserted))
    }

    async fn list_candidates(&self) -> StoreResult<Vec<CandidateRow>> {
        sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    async fn find_candidate(&self, id: i64) -> StoreResult<Option<CandidateRow>> {
        sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_candidates_above(&self, threshold: f64) -> StoreResult<Vec<CandidateRow>> {
        sqlx::query_as::<_, CandidateRow>(
            "DELETE FROM candidates WHERE score IS NOT NULL AND score > $1 RETURNING *",
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await
    }

    async fn insert_interview(&self, interview: NewInterview) -> StoreResult<InterviewRow> {
        sqlx::query_as::<_, InterviewRow>(
            r#"
            INSERT INTO interviews
                (candidate_id, candidate_name, email, score, interview_datetime)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(interview.candidate_id)
        .bind(&interview.candidate_name)
        .bind(&interview.email)
        .bind(interview.score)
        .bind(&interview.interview_datetime)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_interviews(&self) -> StoreResult<Vec<InterviewRow>> {
        sqlx::query_as::<_, InterviewRow>(
            "SELECT * FROM interviews ORDER BY interview_datetime DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn delete_interview(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
