//! Resume screening: ingestion, scoring, promotion and the resume/candidate
//! endpoints built on them.
//!
//! Flow per upload: duplicate check → extract → authenticity check →
//! store (or discard). The scoring sweep then re-reads every stored resume,
//! scores it, and promotes anything above [`PROMOTION_THRESHOLD`].

pub mod cleanup;
pub mod handlers;
pub mod ingest;
pub mod scoring;

/// Scores strictly above this become candidates.
pub const PROMOTION_THRESHOLD: f64 = 5.0;

pub const DUPLICATE_NAME: &str = "Duplicate";
pub const DUPLICATE_MESSAGE: &str = "Duplicate filename. Not added.";
pub const UNSUPPORTED_MESSAGE: &str = "Unsupported or empty file.";

pub fn qualifies_for_promotion(score: Option<f64>) -> bool {
    score.is_some_and(|s| s > PROMOTION_THRESHOLD)
}
