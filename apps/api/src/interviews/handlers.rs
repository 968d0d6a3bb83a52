//! Axum route handlers for interview scheduling.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::extraction::strip_nul;
use crate::interviews::scheduling::schedule_interview;
use crate::interviews::slots::interview_time_slots;
use crate::models::interview::InterviewView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleInterviewRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub candidate_id: Option<i64>,
    #[serde(default)]
    pub interview_date: Option<String>,
    #[serde(default)]
    pub interview_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InterviewsResponse {
    pub results: Vec<InterviewView>,
}

#[derive(Debug, Serialize)]
pub struct TimeSlotsResponse {
    pub slots: Vec<String>,
}

/// Accepts `7` or `"7"`. Anything else reads as absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Number(id)) => Some(id),
        Some(RawId::Text(text)) => text.trim().parse().ok(),
        Some(RawId::Other(_)) | None => None,
    })
}

fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /schedule-interview
///
/// The interview row is kept even when the email fails; that case is a 500.
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleInterviewRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let missing = || AppError::Validation("Missing required fields.".to_string());
    let candidate_id = request.candidate_id.filter(|id| *id != 0).ok_or_else(missing)?;
    let date = required(request.interview_date.as_deref()).ok_or_else(missing)?;
    let time = required(request.interview_time.as_deref()).ok_or_else(missing)?;

    let (date, time) = (strip_nul(date), strip_nul(time));

    let scheduled = schedule_interview(&state, candidate_id, &date, &time).await?;
    match scheduled.delivery {
        Ok(()) => Ok(Json(json!({
            "message": format!("Interview scheduled and email sent to {}.", scheduled.interview.email)
        }))),
        Err(e) => Err(AppError::Notification(format!(
            "Interview saved but failed to send email: {e}"
        ))),
    }
}

/// GET /interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
) -> Result<Json<InterviewsResponse>, AppError> {
    let results = state
        .store
        .list_interviews()
        .await?
        .into_iter()
        .map(InterviewView::from)
        .collect();
    Ok(Json(InterviewsResponse { results }))
}

/// DELETE /cancel-interview/:id
pub async fn handle_cancel_interview(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if !state.store.delete_interview(id).await? {
        return Err(AppError::NotFound("Interview not found.".to_string()));
    }
    Ok(Json(json!({ "message": "Interview cancelled." })))
}

/// GET /interview-time-slots
pub async fn handle_interview_time_slots() -> Json<TimeSlotsResponse> {
    Json(TimeSlotsResponse {
        slots: interview_time_slots(),
    })
}
