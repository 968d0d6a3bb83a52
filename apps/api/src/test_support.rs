//! In-process doubles and fixtures shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tempfile::TempDir;

use crate::extraction::extract_name;
use crate::llm_client::LlmError;
use crate::models::candidate::CandidateRow;
use crate::models::resume::ResumeRow;
use crate::notify::{InterviewInvitation, Notifier, NotifyError};
use crate::oracle::{AuthenticityVerdict, FitVerdict, ScreeningOracle};
use crate::repository::memory::MemoryRecordStore;
use crate::state::AppState;
use crate::storage::{generate_key, ContentStore, LocalContentStore};

pub fn genuine_reply() -> String {
    r#"{"fake": "No", "reason": "Consistent history and concrete detail."}"#.to_string()
}

pub fn fake_reply() -> String {
    r#"{"fake": "Yes", "reason": "Buzzwords with no verifiable experience."}"#.to_string()
}

const DEFAULT_FIT_REPLY: &str = r#"{"score": 0, "explanation": "No overlap."}"#;

/// Oracle that replays queued replies through the real verdict parsers.
/// An empty queue answers "genuine" / score 0.
#[derive(Default)]
pub struct ScriptedOracle {
    authenticity: Mutex<VecDeque<String>>,
    fit: Mutex<VecDeque<String>>,
    fail_next: Mutex<bool>,
    authenticity_calls: Mutex<usize>,
    fit_job_descriptions: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    pub fn push_authenticity(&self, reply: impl Into<String>) {
        self.authenticity.lock().unwrap().push_back(reply.into());
    }

    pub fn push_fit(&self, reply: impl Into<String>) {
        self.fit.lock().unwrap().push_back(reply.into());
    }

    /// The next call of either kind fails with a 503.
    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    pub fn authenticity_calls(&self) -> usize {
        *self.authenticity_calls.lock().unwrap()
    }

    pub fn fit_calls(&self) -> usize {
        self.fit_job_descriptions.lock().unwrap().len()
    }

    pub fn last_fit_job_description(&self) -> Option<String> {
        self.fit_job_descriptions.lock().unwrap().last().cloned()
    }

    fn take_failure(&self) -> Result<(), LlmError> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ScreeningOracle for ScriptedOracle {
    async fn assess_authenticity(
        &self,
        _resume_text: &str,
        _job_description: &str,
    ) -> Result<AuthenticityVerdict, LlmError> {
        self.take_failure()?;
        *self.authenticity_calls.lock().unwrap() += 1;
        let reply = self
            .authenticity
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(genuine_reply);
        Ok(AuthenticityVerdict::from_reply(&reply))
    }

    async fn score_fit(
        &self,
        _resume_text: &str,
        job_description: &str,
    ) -> Result<FitVerdict, LlmError> {
        self.take_failure()?;
        self.fit_job_descriptions
            .lock()
            .unwrap()
            .push(job_description.to_string());
        let reply = self
            .fit
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| DEFAULT_FIT_REPLY.to_string());
        Ok(FitVerdict::from_reply(&reply))
    }
}

/// A sent invitation, owned.
#[derive(Debug, Clone, PartialEq)]
pub struct SentInvitation {
    pub to: String,
    pub candidate_name: String,
    pub interview_datetime: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentInvitation>>,
    fail: Mutex<bool>,
}

impl RecordingNotifier {
    pub fn fail_sends(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn sent(&self) -> Vec<SentInvitation> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_interview_invitation(
        &self,
        invitation: &InterviewInvitation<'_>,
    ) -> Result<(), NotifyError> {
        if *self.fail.lock().unwrap() {
            return Err(NotifyError::Transport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(SentInvitation {
            to: invitation.to.to_string(),
            candidate_name: invitation.candidate_name.to_string(),
            interview_datetime: invitation.interview_datetime.to_string(),
        });
        Ok(())
    }
}

/// `AppState` wired to in-memory rows, a temp-dir content store, a scripted
/// oracle and a recording notifier.
pub struct TestHarness {
    pub state: AppState,
    pub memory: Arc<MemoryRecordStore>,
    pub oracle: Arc<ScriptedOracle>,
    pub notifier: Arc<RecordingNotifier>,
    content: Arc<LocalContentStore>,
    dir: TempDir,
}

impl TestHarness {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let content = Arc::new(LocalContentStore::new(dir.path()).await.unwrap());
        let memory = Arc::new(MemoryRecordStore::new());
        let oracle = Arc::new(ScriptedOracle::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let state = AppState {
            store: memory.clone(),
            content: content.clone(),
            oracle: oracle.clone(),
            notifier: notifier.clone(),
        };

        Self {
            state,
            memory,
            oracle,
            notifier,
            content,
            dir,
        }
    }

    /// Writes `body` to the content store and seeds a matching unscored row
    /// whose job description is `"stored jd"`.
    pub async fn stored_resume(&self, filename: &str, body: &str) -> ResumeRow {
        let key = generate_key(filename);
        self.content
            .put(&key, Bytes::from(body.to_string()))
            .await
            .unwrap();
        let mut row = resume_row(filename, &key, None);
        row.candidate_name = extract_name(body);
        self.memory.seed_resume(row)
    }

    pub async fn content_exists(&self, key: &str) -> bool {
        self.content.get(key).await.unwrap().is_some()
    }

    pub fn stored_object_count(&self) -> usize {
        std::fs::read_dir(self.dir.path()).unwrap().count()
    }
}

/// A non-fake resume row; `id` is assigned when seeded.
pub fn resume_row(filename: &str, stored_filename: &str, score: Option<f64>) -> ResumeRow {
    ResumeRow {
        id: 0,
        filename: filename.to_string(),
        stored_filename: stored_filename.to_string(),
        candidate_name: "Unknown".to_string(),
        is_fake: false,
        job_description: "stored jd".to_string(),
        score,
        explanation: None,
        email: None,
        upload_time: Utc::now(),
    }
}

/// A candidate row with no email or explanation; `id` is assigned when seeded.
pub fn candidate_row(filename: &str, name: &str, score: Option<f64>) -> CandidateRow {
    CandidateRow {
        id: 0,
        filename: filename.to_string(),
        stored_filename: format!("{filename}.key"),
        candidate_name: name.to_string(),
        job_description: "stored jd".to_string(),
        score,
        explanation: None,
        email: None,
        upload_time: Utc::now(),
    }
}
