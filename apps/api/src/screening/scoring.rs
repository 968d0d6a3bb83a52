//! Scoring sweep over every stored resume, with promotion to candidates.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{extract_email, extract_name, extract_text};
use crate::models::candidate::NewCandidate;
use crate::models::resume::ResumeRow;
use crate::repository::{InsertOutcome, RecordStore};
use crate::screening::{qualifies_for_promotion, PROMOTION_THRESHOLD, UNSUPPORTED_MESSAGE};
use crate::state::AppState;

/// One entry of the `/parse-resumes` response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredResume {
    pub filename: String,
    pub name: String,
    pub score: Option<f64>,
    pub explanation: String,
    pub stored_filename: Option<String>,
}

/// Re-scores every non-fake resume against `job_description` (falling back to
/// each resume's own stored description when blank), then backfills missing
/// candidates.
///
/// Resumes whose backing file is gone are skipped. Oracle failures abort the
/// sweep; resumes already scored keep their new scores.
pub async fn score_all(
    state: &AppState,
    job_description: &str,
) -> Result<Vec<ScoredResume>, AppError> {
    let resumes = state.store.list_active_resumes().await?;
    let mut results = Vec::with_capacity(resumes.len());

    for resume in resumes {
        let Some(bytes) = state.content.get(&resume.stored_filename).await? else {
            warn!(
                "Backing file {} for resume {} is missing, skipping",
                resume.stored_filename, resume.id
            );
            continue;
        };

        let text = extract_text(&resume.filename, bytes).await;
        let name = extract_name(&text);

        if text.trim().is_empty() {
            state
                .store
                .record_score(resume.id, None, UNSUPPORTED_MESSAGE, None)
                .await?;
            results.push(ScoredResume {
                filename: resume.filename,
                name,
                score: None,
                explanation: UNSUPPORTED_MESSAGE.to_string(),
                stored_filename: Some(resume.stored_filename),
            });
            continue;
        }

        let jd = if job_description.trim().is_empty() {
            resume.job_description.as_str()
        } else {
            job_description
        };
        let verdict = state.oracle.score_fit(&text, jd).await?;
        let email = extract_email(&text);

        state
            .store
            .record_score(resume.id, verdict.score, &verdict.explanation, email.as_deref())
            .await?;

        if qualifies_for_promotion(verdict.score) {
            let candidate = NewCandidate {
                filename: resume.filename.clone(),
                stored_filename: resume.stored_filename.clone(),
                candidate_name: name.clone(),
                job_description: resume.job_description.clone(),
                score: verdict.score,
                explanation: Some(verdict.explanation.clone()),
                email: resume.email.clone().filter(|e| !e.is_empty()).or(email),
            };
            promote(state.store.as_ref(), candidate).await?;
        }

        results.push(ScoredResume {
            filename: resume.filename,
            name,
            score: verdict.score,
            explanation: verdict.explanation,
            stored_filename: Some(resume.stored_filename),
        });
    }

    backfill_candidates(state.store.as_ref()).await?;

    Ok(results)
}

/// Ensures every non-fake resume above the threshold has a candidate row.
/// Returns how many were created.
pub async fn backfill_candidates(store: &dyn RecordStore) -> Result<usize, AppError> {
    let mut created = 0;
    for resume in store.list_resumes_above(PROMOTION_THRESHOLD).await? {
        if promote_resume(store, &resume).await? {
            created += 1;
        }
    }
    if created > 0 {
        info!("Backfilled {created} missing candidates");
    }
    Ok(created)
}

async fn promote_resume(store: &dyn RecordStore, resume: &ResumeRow) -> Result<bool, AppError> {
    promote(store, NewCandidate::from_resume(resume)).await
}

/// Inserts the candidate unless one with the same filename exists.
async fn promote(store: &dyn RecordStore, candidate: NewCandidate) -> Result<bool, AppError> {
    if store.candidate_exists(&candidate.filename).await? {
        return Ok(false);
    }
    match store.insert_candidate(candidate).await? {
        InsertOutcome::Inserted(row) => {
            info!(
                "Promoted {} to candidate {} (score {:?})",
                row.filename, row.id, row.score
            );
            Ok(true)
        }
        InsertOutcome::Duplicate => Ok(false),
    }
}
