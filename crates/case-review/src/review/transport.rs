use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::payload::SubmissionPayload;

/// Outbound hook that hands a finished review to the backend.
pub trait SubmissionTransport: Send + Sync {
    fn deliver(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, TransportError>;
}

/// Acknowledgement returned by the transport for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub room_id: String,
    pub accepted_at: DateTime<Utc>,
}

/// Submission delivery error.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("submission transport unavailable: {0}")]
    Unavailable(String),
    #[error("submission rejected by backend: {0}")]
    Rejected(String),
}
