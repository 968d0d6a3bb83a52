pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::interviews::handlers as interviews;
use crate::screening::handlers as screening;
use crate::state::AppState;

/// `max_upload_bytes` caps the multipart body of the two upload routes.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening (uploads get a larger body limit)
        .route(
            "/detect",
            post(screening::handle_detect).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/parse-resumes",
            post(screening::handle_parse_resumes)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/parsed-resumes", get(screening::handle_parsed_resumes))
        .route("/candidates", get(screening::handle_candidates))
        .route("/delete-resume/:id", delete(screening::handle_delete_resume))
        .route(
            "/delete-resume-by-filename/:filename",
            delete(screening::handle_delete_resume_by_filename),
        )
        .route(
            "/delete-resume-by-stored-filename/:stored_filename",
            delete(screening::handle_delete_resume_by_stored_filename),
        )
        .route(
            "/download-resume/:stored_filename",
            get(screening::handle_download_resume),
        )
        .route("/clear-resumes", post(screening::handle_clear_resumes))
        .route(
            "/clear-candidates-above-score",
            post(screening::handle_clear_candidates_above_score),
        )
        // Interviews
        .route(
            "/schedule-interview",
            post(interviews::handle_schedule_interview),
        )
        .route("/interviews", get(interviews::handle_list_interviews))
        .route(
            "/cancel-interview/:id",
            delete(interviews::handle_cancel_interview),
        )
        .route(
            "/interview-time-slots",
            get(interviews::handle_interview_time_slots),
        )
        .with_state(state)
}
