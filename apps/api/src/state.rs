use std::sync::Arc;

use crate::notify::Notifier;
use crate::oracle::ScreeningOracle;
use crate::repository::RecordStore;
use crate::storage::ContentStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every collaborator sits behind a trait object so tests can swap in
/// in-process doubles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    /// Uploaded resume bytes, keyed by `stored_filename`.
    pub content: Arc<dyn ContentStore>,
    pub oracle: Arc<dyn ScreeningOracle>,
    pub notifier: Arc<dyn Notifier>,
}
