use thiserror::Error;

use crate::domain::SentimentLabel;

/// Any reason the refinement step produced nothing usable.
#[derive(Debug, Error)]
pub enum RefinementError {
    #[error("refinement credential is not configured")]
    MissingCredential,
    #[error("refinement request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("refinement service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("refinement response contained no tool call")]
    MissingToolCall,
    #[error("malformed refinement payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("sentiment score {0} outside [-1, 1]")]
    ScoreOutOfRange(f64),
    #[error("sentiment score {score} contradicts label {label}")]
    ScoreContradictsLabel { label: SentimentLabel, score: f64 },
}

impl RefinementError {
    /// Missing configuration rather than a failed call.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RefinementError::MissingCredential)
    }
}
