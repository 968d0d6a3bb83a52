//! Axum route handlers for resume screening and the candidate pool.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::strip_nul;
use crate::models::candidate::CandidateView;
use crate::models::resume::ParsedResumeView;
use crate::screening::cleanup::{clear_above_threshold, clear_resumes, remove_resume};
use crate::screening::ingest::{ingest_upload, IngestOutcome, Upload};
use crate::screening::scoring::{score_all, ScoredResume};
use crate::screening::{DUPLICATE_MESSAGE, DUPLICATE_NAME, PROMOTION_THRESHOLD};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Multipart body shared by `/detect` and `/parse-resumes`.
#[derive(Debug, Default)]
pub struct ScreeningForm {
    pub uploads: Vec<Upload>,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct DetectionResult {
    pub filename: String,
    pub name: String,
    pub result: String,
    pub is_fake: bool,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse<T> {
    pub results: Vec<T>,
}

fn message(text: String) -> Json<Value> {
    Json(json!({ "message": text }))
}

fn resume_not_found() -> AppError {
    AppError::NotFound("Resume not found.".to_string())
}

/// Reads `resumes` / `resumes[]` file parts and the `job_description` field.
/// Unknown parts and file inputs submitted without a filename are ignored.
pub async fn read_screening_form(mut multipart: Multipart) -> Result<ScreeningForm, AppError> {
    let mut form = ScreeningForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "job_description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable job_description: {e}")))?;
                form.job_description = strip_nul(&text);
            }
            "resumes" | "resumes[]" => {
                let Some(filename) = field.file_name().map(strip_nul) else {
                    continue;
                };
                if filename.is_empty() {
                    continue;
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable file {filename}: {e}")))?;
                info!("Received upload {} ({} bytes)", filename, bytes.len());
                form.uploads.push(Upload { filename, bytes });
            }
            _ => {}
        }
    }

    Ok(form)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /detect
///
/// Authenticity check per uploaded file. Genuine files are stored; fakes are
/// only reported.
pub async fn handle_detect(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResultsResponse<DetectionResult>>, AppError> {
    let form = read_screening_form(multipart).await?;
    let mut results = Vec::with_capacity(form.uploads.len());

    for upload in &form.uploads {
        let result = match ingest_upload(&state, upload, &form.job_description).await? {
            IngestOutcome::Duplicate => DetectionResult {
                filename: upload.filename.clone(),
                name: DUPLICATE_NAME.to_string(),
                result: DUPLICATE_MESSAGE.to_string(),
                is_fake: false,
            },
            IngestOutcome::Discarded { name, verdict } => DetectionResult {
                filename: upload.filename.clone(),
                name,
                result: verdict.summary,
                is_fake: true,
            },
            IngestOutcome::Stored { resume, result } => DetectionResult {
                filename: resume.filename,
                name: resume.candidate_name,
                result,
                is_fake: false,
            },
        };
        results.push(result);
    }

    Ok(Json(ResultsResponse { results }))
}

/// POST /parse-resumes
///
/// Ingests any new files, then re-scores every stored resume and promotes
/// high scorers.
pub async fn handle_parse_resumes(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResultsResponse<ScoredResume>>, AppError> {
    let form = read_screening_form(multipart).await?;
    let mut results = Vec::new();

    for upload in &form.uploads {
        match ingest_upload(&state, upload, &form.job_description).await? {
            IngestOutcome::Duplicate => results.push(ScoredResume {
                filename: upload.filename.clone(),
                name: DUPLICATE_NAME.to_string(),
                score: None,
                explanation: DUPLICATE_MESSAGE.to_string(),
                stored_filename: None,
            }),
            IngestOutcome::Discarded { name, verdict } => results.push(ScoredResume {
                filename: upload.filename.clone(),
                name,
                score: None,
                explanation: verdict.summary,
                stored_filename: None,
            }),
            // Reported by the sweep below.
            IngestOutcome::Stored { .. } => {}
        }
    }

    results.extend(score_all(&state, &form.job_description).await?);

    Ok(Json(ResultsResponse { results }))
}

/// GET /parsed-resumes
pub async fn handle_parsed_resumes(
    State(state): State<AppState>,
) -> Result<Json<ResultsResponse<ParsedResumeView>>, AppError> {
    let results = state
        .store
        .list_active_resumes()
        .await?
        .into_iter()
        .map(ParsedResumeView::from)
        .collect();
    Ok(Json(ResultsResponse { results }))
}

/// GET /candidates
pub async fn handle_candidates(
    State(state): State<AppState>,
) -> Result<Json<ResultsResponse<CandidateView>>, AppError> {
    let results = state
        .store
        .list_candidates()
        .await?
        .into_iter()
        .map(CandidateView::from)
        .collect();
    Ok(Json(ResultsResponse { results }))
}

/// DELETE /delete-resume/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let resume = state.store.find_resume(id).await?.ok_or_else(resume_not_found)?;
    remove_resume(&state, &resume).await?;
    Ok(message("Resume deleted.".to_string()))
}

/// DELETE /delete-resume-by-filename/:filename
pub async fn handle_delete_resume_by_filename(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<Value>, AppError> {
    let resume = state
        .store
        .find_resume_by_filename(&filename)
        .await?
        .ok_or_else(resume_not_found)?;
    remove_resume(&state, &resume).await?;
    Ok(message("Resume deleted.".to_string()))
}

/// DELETE /delete-resume-by-stored-filename/:stored_filename
pub async fn handle_delete_resume_by_stored_filename(
    State(state): State<AppState>,
    Path(stored_filename): Path<String>,
) -> Result<Json<Value>, AppError> {
    let resume = state
        .store
        .find_resume_by_stored_filename(&stored_filename)
        .await?
        .ok_or_else(resume_not_found)?;
    remove_resume(&state, &resume).await?;
    Ok(message("Resume deleted.".to_string()))
}

/// GET /download-resume/:stored_filename
///
/// Fake resumes and rows whose file has gone missing are both a 404.
pub async fn handle_download_resume(
    State(state): State<AppState>,
    Path(stored_filename): Path<String>,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound("Resume not found or is marked as fake.".to_string());

    let resume = state
        .store
        .find_resume_by_stored_filename(&stored_filename)
        .await?
        .filter(|r| !r.is_fake)
        .ok_or_else(not_found)?;
    let bytes = state
        .content
        .get(&resume.stored_filename)
        .await?
        .ok_or_else(not_found)?;

    let content_type = mime_guess::from_path(&resume.stored_filename).first_or_octet_stream();
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", resume.stored_filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// POST /clear-resumes
pub async fn handle_clear_resumes(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let count = clear_resumes(&state).await?;
    Ok(message(format!("Cleared {count} resumes and all files.")))
}

/// POST /clear-candidates-above-score
pub async fn handle_clear_candidates_above_score(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let counts = clear_above_threshold(&state).await?;
    Ok(message(format!(
        "Deleted {} candidates and {} resumes with score > {}.",
        counts.candidates, counts.resumes, PROMOTION_THRESHOLD
    )))
}
