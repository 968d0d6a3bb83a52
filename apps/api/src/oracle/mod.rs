//! Screening oracle: authenticity and fit judgments from the LLM.
//!
//! Callers only ever see typed verdicts. How a reply is turned into a verdict
//! lives in [`verdict`].

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};

pub mod prompts;
pub mod verdict;

pub use verdict::{AuthenticityVerdict, FitVerdict};

use prompts::{
    with_json_instruction, AUTHENTICITY_PROMPT_TEMPLATE, AUTHENTICITY_SYSTEM,
    FIT_PROMPT_TEMPLATE, FIT_SYSTEM,
};

/// Carried in `AppState` as `Arc<dyn ScreeningOracle>`.
#[async_trait]
pub trait ScreeningOracle: Send + Sync {
    async fn assess_authenticity(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AuthenticityVerdict, LlmError>;

    async fn score_fit(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<FitVerdict, LlmError>;
}

/// Production oracle backed by Claude.
pub struct LlmOracle(pub LlmClient);

#[async_trait]
impl ScreeningOracle for LlmOracle {
    async fn assess_authenticity(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AuthenticityVerdict, LlmError> {
        let prompt = render(AUTHENTICITY_PROMPT_TEMPLATE, resume_text, job_description);
        let reply = self.0.complete(&prompt, AUTHENTICITY_SYSTEM).await?;
        Ok(AuthenticityVerdict::from_reply(&reply))
    }

    async fn score_fit(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<FitVerdict, LlmError> {
        let prompt = render(FIT_PROMPT_TEMPLATE, resume_text, job_description);
        let reply = self.0.complete(&prompt, FIT_SYSTEM).await?;
        Ok(FitVerdict::from_reply(&reply))
    }
}

fn render(template: &str, resume_text: &str, job_description: &str) -> String {
    with_json_instruction(
        template
            .replace("{job_description}", job_description)
            .replace("{resume_text}", resume_text),
    )
}
