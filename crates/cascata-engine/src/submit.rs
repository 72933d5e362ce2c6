use async_trait::async_trait;
use cascata_core::Key;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// The payload handed to the submission sink: bare keys for both levels,
/// the record id when one exists, and the sibling fields verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub parent_id: Key,
    pub child_id: Key,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// What the sink reports back on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub message: String,
}

#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    /// The sink rejected the payload and said why. The message is suitable
    /// for showing to the user verbatim.
    #[error("{0}")]
    Rejected(String),
    /// The sink could not be reached or gave no usable answer.
    #[error("submission transport failed: {0}")]
    Transport(String),
}

/// Accepts the resolved payload. The session never interprets the sibling
/// fields it forwards.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitReceipt, SubmitError>;
}
