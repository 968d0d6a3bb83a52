//! Interview creation and notification-address resolution.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::extract_email;
use crate::models::candidate::CandidateRow;
use crate::models::interview::{InterviewRow, NewInterview};
use crate::notify::{InterviewInvitation, NotifyError};
use crate::repository::RecordStore;
use crate::state::AppState;

/// Used when no source yields an address. The interview is still recorded.
pub const PLACEHOLDER_EMAIL: &str = "candidate@example.com";

/// A saved interview plus the outcome of the invitation send.
#[derive(Debug)]
pub struct ScheduledInterview {
    pub interview: InterviewRow,
    pub delivery: Result<(), NotifyError>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Resolves where the invitation goes, in order:
///
/// 1. the candidate's stored email
/// 2. an address found in the candidate's explanation
/// 3. the resume with the same filename: its stored email, otherwise an
///    address found in the first non-empty of explanation, name, filename
/// 4. [`PLACEHOLDER_EMAIL`]
///
/// Step 3 looks at exactly one resume field; a non-empty field without an
/// address does not fall through to the next one.
pub async fn resolve_email(
    store: &dyn RecordStore,
    candidate: &CandidateRow,
) -> Result<String, AppError> {
    if let Some(email) = present(candidate.email.as_deref()) {
        return Ok(email.to_string());
    }
    if let Some(found) = present(candidate.explanation.as_deref()).and_then(extract_email) {
        return Ok(found);
    }

    if let Some(resume) = store.find_resume_by_filename(&candidate.filename).await? {
        let from_resume = if let Some(email) = present(resume.email.as_deref()) {
            Some(email.to_string())
        } else {
            present(resume.explanation.as_deref())
                .or_else(|| present(Some(resume.candidate_name.as_str())))
                .or_else(|| present(Some(resume.filename.as_str())))
                .and_then(extract_email)
        };
        if let Some(email) = from_resume {
            return Ok(email);
        }
    }

    Ok(PLACEHOLDER_EMAIL.to_string())
}

/// Records an interview for `candidate_id` and sends the invitation. The
/// row stays even when the send fails.
pub async fn schedule_interview(
    state: &AppState,
    candidate_id: i64,
    interview_date: &str,
    interview_time: &str,
) -> Result<ScheduledInterview, AppError> {
    let candidate = state
        .store
        .find_candidate(candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found.".to_string()))?;

    let interview_datetime = format!("{interview_date} {interview_time}");
    let email = resolve_email(state.store.as_ref(), &candidate).await?;
    if email == PLACEHOLDER_EMAIL {
        warn!("No address found for candidate {}; using placeholder", candidate.id);
    }

    let interview = state
        .store
        .insert_interview(NewInterview {
            candidate_id: candidate.id,
            candidate_name: candidate.candidate_name.clone(),
            email: email.clone(),
            score: candidate.score,
            interview_datetime: interview_datetime.clone(),
        })
        .await?;
    info!(
        "Scheduled interview {} for candidate {} at {}",
        interview.id, candidate.id, interview.interview_datetime
    );

    let invitation = InterviewInvitation {
        to: &email,
        candidate_name: &candidate.candidate_name,
        interview_datetime: &interview_datetime,
    };
    let delivery = state.notifier.send_interview_invitation(&invitation).await;
    if let Err(e) = &delivery {
        warn!("Invitation to {email} failed: {e}");
    }

    Ok(ScheduledInterview {
        interview,
        delivery,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{candidate_row, resume_row, TestHarness};

    #[tokio::test]
    async fn test_candidate_email_wins() {
        let harness = TestHarness::new().await;
        let mut candidate = candidate_row("jane.txt", "Jane Doe", Some(8.0));
        candidate.email = Some("jane@example.com".to_string());
        candidate.explanation = Some("reach her at other@example.com".to_string());

        let email = resolve_email(harness.memory.as_ref(), &candidate).await.unwrap();
        assert_eq!(email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_falls_back_to_candidate_explanation() {
        let harness = TestHarness::new().await;
        let mut candidate = candidate_row("jane.txt", "Jane Doe", Some(8.0));
        candidate.email = Some(String::new());
        candidate.explanation = Some("Strong fit. Contact: jd@corp.io".to_string());

        let email = resolve_email(harness.memory.as_ref(), &candidate).await.unwrap();
        assert_eq!(email, "jd@corp.io");
    }

    #[tokio::test]
    async fn test_falls_back_to_resume_email_not_placeholder() {
        let harness = TestHarness::new().await;
        let mut resume = resume_row("jane.txt", "k.txt", Some(8.0));
        resume.email = Some("jane@resume.dev".to_string());
        harness.memory.seed_resume(resume);
        let candidate = candidate_row("jane.txt", "Jane Doe", Some(8.0));

        let email = resolve_email(harness.memory.as_ref(), &candidate).await.unwrap();
        assert_eq!(email, "jane@resume.dev");
    }

    #[tokio::test]
    async fn test_resume_step_consults_only_first_present_field() {
        let harness = TestHarness::new().await;
        let mut resume = resume_row("jane@files.dev.pdf", "k.pdf", Some(8.0));
        resume.explanation = Some("Solid experience.".to_string());
        harness.memory.seed_resume(resume);
        let candidate = candidate_row("jane@files.dev.pdf", "Jane Doe", Some(8.0));

        let email = resolve_email(harness.memory.as_ref(), &candidate).await.unwrap();
        assert_eq!(email, PLACEHOLDER_EMAIL);
    }

    #[tokio::test]
    async fn test_no_source_gives_placeholder() {
        let harness = TestHarness::new().await;
        let candidate = candidate_row("jane.txt", "Jane Doe", Some(8.0));

        let email = resolve_email(harness.memory.as_ref(), &candidate).await.unwrap();
        assert_eq!(email, PLACEHOLDER_EMAIL);
    }

    #[tokio::test]
    async fn test_send_failure_keeps_interview() {
        let harness = TestHarness::new().await;
        let candidate = harness
            .memory
            .seed_candidate(candidate_row("jane.txt", "Jane Doe", Some(8.0)));
        harness.notifier.fail_sends();

        let scheduled = schedule_interview(&harness.state, candidate.id, "2026-11-02", "10:30 AM")
            .await
            .unwrap();

        assert!(scheduled.delivery.is_err());
        assert_eq!(scheduled.interview.interview_datetime, "2026-11-02 10:30 AM");
        assert_eq!(scheduled.interview.email, PLACEHOLDER_EMAIL);
        assert_eq!(harness.state.store.list_interviews().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_candidate_is_not_found() {
        let harness = TestHarness::new().await;

        let err = schedule_interview(&harness.state, 42, "2026-11-02", "10:30 AM")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(harness.state.store.list_interviews().await.unwrap().is_empty());
    }
}
