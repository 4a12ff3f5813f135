//! Text classification capability trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to a text classification backend.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Label \"{0}\" is not part of the mood vocabulary")]
    UnknownLabel(String),

    #[error("Request timeout")]
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        LabelScore {
            label: label.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierOutput {
    /// Candidate labels with their confidence.
    Ranked(Vec<LabelScore>),
    /// A single sentiment verdict.
    Sentiment { polarity: Polarity, confidence: f64 },
}

/// A black-box text classifier.
///
/// With `candidate_labels` the backend is expected to rank those labels
/// (zero-shot); without them it is expected to return a sentiment.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &str;

    async fn classify(
        &self,
        text: &str,
        candidate_labels: Option<&[String]>,
    ) -> Result<ClassifierOutput, ClassificationError>;
}
