//! Ingestion of a single uploaded resume.

use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{extract_email, extract_name, extract_text};
use crate::models::resume::{NewResume, ResumeRow};
use crate::oracle::AuthenticityVerdict;
use crate::repository::InsertOutcome;
use crate::screening::UNSUPPORTED_MESSAGE;
use crate::state::AppState;
use crate::storage::generate_key;

/// One file from a multipart upload.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Terminal state of an ingested upload.
#[derive(Debug)]
pub enum IngestOutcome {
    /// A resume with the same original filename is already on file.
    Duplicate,
    /// Flagged by the authenticity check. Nothing was written.
    Discarded {
        name: String,
        verdict: AuthenticityVerdict,
    },
    /// Bytes written to the content store and the row recorded.
    Stored {
        resume: ResumeRow,
        /// Authenticity summary, or the unsupported-file notice when no text
        /// could be extracted.
        result: String,
    },
}

/// Runs one upload through duplicate check, extraction, authenticity check
/// and persistence.
///
/// Oracle failures propagate; nothing has been written at that point.
pub async fn ingest_upload(
    state: &AppState,
    upload: &Upload,
    job_description: &str,
) -> Result<IngestOutcome, AppError> {
    if state
        .store
        .find_resume_by_filename(&upload.filename)
        .await?
        .is_some()
    {
        info!("Skipping duplicate upload {}", upload.filename);
        return Ok(IngestOutcome::Duplicate);
    }

    let text = extract_text(&upload.filename, upload.bytes.clone()).await;
    let name = extract_name(&text);

    let result = if text.trim().is_empty() {
        // Nothing to judge; the scoring sweep marks it as unsupported.
        UNSUPPORTED_MESSAGE.to_string()
    } else {
        let verdict = state
            .oracle
            .assess_authenticity(&text, job_description)
            .await?;
        if verdict.is_fake {
            info!("Discarding {} flagged as fake", upload.filename);
            return Ok(IngestOutcome::Discarded { name, verdict });
        }
        verdict.summary
    };

    let stored_filename = generate_key(&upload.filename);
    state
        .content
        .put(&stored_filename, upload.bytes.clone())
        .await?;

    let inserted = state
        .store
        .insert_resume(NewResume {
            filename: upload.filename.clone(),
            stored_filename: stored_filename.clone(),
            candidate_name: name,
            job_description: job_description.to_string(),
            email: extract_email(&text),
        })
        .await;
    let outcome = match inserted {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Err(cleanup) = state.content.delete(&stored_filename).await {
                warn!("Could not remove orphaned object {stored_filename}: {cleanup}");
            }
            return Err(e.into());
        }
    };

    match outcome {
        InsertOutcome::Inserted(resume) => {
            info!(
                "Stored resume {} as {} (id {})",
                resume.filename, resume.stored_filename, resume.id
            );
            Ok(IngestOutcome::Stored { resume, result })
        }
        InsertOutcome::Duplicate => {
            // Lost a race with a concurrent upload of the same filename.
            warn!(
                "Concurrent duplicate upload of {}, removing {}",
                upload.filename, stored_filename
            );
            state.content.delete(&stored_filename).await?;
            Ok(IngestOutcome::Duplicate)
        }
    }
}
