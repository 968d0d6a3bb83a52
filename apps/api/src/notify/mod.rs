//! Outbound candidate notifications.

use async_trait::async_trait;
use thiserror::Error;

pub mod smtp;

pub use smtp::SmtpNotifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("could not build message: {0}")]
    Message(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Everything an interview invitation needs.
#[derive(Debug, Clone)]
pub struct InterviewInvitation<'a> {
    pub to: &'a str,
    pub candidate_name: &'a str,
    pub interview_datetime: &'a str,
}

impl InterviewInvitation<'_> {
    pub const SUBJECT: &'static str = "You're Selected! Interview Scheduled";

    pub fn body(&self) -> String {
        format!(
            "Dear {name},\n\n\
             Congratulations! You have been shortlisted based on your resume.\n\n\
             Your interview is scheduled for:\n\
             {when}\n\n\
             Please make sure you are available at that time with a stable internet \
             connection. A meeting link will be sent closer to the interview.\n\n\
             Best of luck!\n\n\
             Regards,\n\
             The Recruiting Team\n",
            name = self.candidate_name,
            when = self.interview_datetime,
        )
    }
}

/// Carried in `AppState` as `Arc<dyn Notifier>`.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_interview_invitation(
        &self,
        invitation: &InterviewInvitation<'_>,
    ) -> Result<(), NotifyError>;
}
