//! Removal of resumes and candidates together with their stored bytes.

use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::screening::PROMOTION_THRESHOLD;
use crate::state::AppState;

/// Deletes the backing object, then the row. A missing object is fine.
pub async fn remove_resume(state: &AppState, resume: &ResumeRow) -> Result<(), AppError> {
    state.content.delete(&resume.stored_filename).await?;
    state.store.delete_resume(resume.id).await?;
    info!("Deleted resume {} ({})", resume.id, resume.filename);
    Ok(())
}

/// Deletes every resume row and its object. Returns the number of rows.
pub async fn clear_resumes(state: &AppState) -> Result<usize, AppError> {
    let removed = state.store.delete_all_resumes().await?;
    for resume in &removed {
        state.content.delete(&resume.stored_filename).await?;
    }
    info!("Cleared {} resumes", removed.len());
    Ok(removed.len())
}

/// Counts removed by [`clear_above_threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedCounts {
    pub candidates: usize,
    pub resumes: usize,
}

/// Deletes candidates and resumes scoring above the promotion threshold,
/// along with their stored objects.
pub async fn clear_above_threshold(state: &AppState) -> Result<ClearedCounts, AppError> {
    let candidates = state.store.delete_candidates_above(PROMOTION_THRESHOLD).await?;
    for candidate in &candidates {
        state.content.delete(&candidate.stored_filename).await?;
    }

    let resumes = state.store.delete_resumes_above(PROMOTION_THRESHOLD).await?;
    for resume in &resumes {
        state.content.delete(&resume.stored_filename).await?;
    }

    info!(
        "Cleared {} candidates and {} resumes above {PROMOTION_THRESHOLD}",
        candidates.len(),
        resumes.len()
    );
    Ok(ClearedCounts {
        candidates: candidates.len(),
        resumes: resumes.len(),
    })
}
