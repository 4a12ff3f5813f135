//! Hugging Face Inference API classifier.

use super::provider::{ClassificationError, ClassifierOutput, LabelScore, Polarity, TextClassifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_ZERO_SHOT_MODEL: &str = "facebook/bart-large-mnli";
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Text classifier backed by a hosted Hugging Face model.
///
/// With candidate labels the model is called as a zero-shot classifier
/// (`facebook/bart-large-mnli` style), otherwise as a plain
/// text-classification model whose top label is read as a sentiment.
pub struct HuggingFaceClassifier {
    client: Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl HuggingFaceClassifier {
    /// # Arguments
    /// * `base_url` - Inference endpoint root (e.g., "https://api-inference.huggingface.co").
    /// * `model` - Model id (e.g., "facebook/bart-large-mnli").
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_token(mut self, api_token: Option<String>) -> Self {
        self.api_token = api_token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextClassifier for HuggingFaceClassifier {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn classify(
        &self,
        text: &str,
        candidate_labels: Option<&[String]>,
    ) -> Result<ClassifierOutput, ClassificationError> {
        let url = format!("{}/models/{}", self.base_url, self.model);
        let request = InferenceRequest {
            inputs: text,
            parameters: candidate_labels.map(|labels| ZeroShotParameters {
                candidate_labels: labels,
            }),
        };

        debug!(
            model = %self.model,
            zero_shot = candidate_labels.is_some(),
            "Sending classification request to Hugging Face"
        );

        let mut builder = self.client.post(&url).json(&request).timeout(self.timeout);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassificationError::Timeout
            } else {
                ClassificationError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassificationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ClassificationError::Timeout
            } else {
                ClassificationError::Connection(e.to_string())
            }
        })?;

        match candidate_labels {
            Some(_) => parse_zero_shot_response(&body),
            None => parse_sentiment_response(&body),
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<ZeroShotParameters<'a>>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
}

// The hosted API has answered zero-shot requests in two shapes over time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Columns { labels: Vec<String>, scores: Vec<f64> },
    Rows(Vec<LabelScore>),
}

// Text-classification answers are nested one level per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SentimentResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// Parses a zero-shot classification body into ranked labels.
pub fn parse_zero_shot_response(body: &str) -> Result<ClassifierOutput, ClassificationError> {
    let parsed: ZeroShotResponse = serde_json::from_str(body).map_err(|e| {
        ClassificationError::InvalidResponse(format!("Failed to parse zero-shot response: {}", e))
    })?;

    let ranked = match parsed {
        ZeroShotResponse::Columns { labels, scores } => {
            if labels.len() != scores.len() {
                return Err(ClassificationError::InvalidResponse(format!(
                    "{} labels but {} scores",
                    labels.len(),
                    scores.len()
                )));
            }
            labels
                .into_iter()
                .zip(scores)
                .map(|(label, score)| LabelScore::new(label, score))
                .collect::<Vec<_>>()
        }
        ZeroShotResponse::Rows(rows) => rows,
    };

    if ranked.is_empty() {
        return Err(ClassificationError::InvalidResponse(
            "No labels returned".to_string(),
        ));
    }
    Ok(ClassifierOutput::Ranked(ranked))
}

/// Parses a text-classification body and reads its top label as a polarity.
pub fn parse_sentiment_response(body: &str) -> Result<ClassifierOutput, ClassificationError> {
    let parsed: SentimentResponse = serde_json::from_str(body).map_err(|e| {
        ClassificationError::InvalidResponse(format!("Failed to parse sentiment response: {}", e))
    })?;

    let rows = match parsed {
        SentimentResponse::Nested(nested) => nested.into_iter().next().unwrap_or_default(),
        SentimentResponse::Flat(rows) => rows,
    };

    let top = rows
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.score > best.score {
                candidate
            } else {
                best
            }
        })
        .ok_or_else(|| ClassificationError::InvalidResponse("No labels returned".to_string()))?;

    Ok(ClassifierOutput::Sentiment {
        polarity: polarity_of(&top.label),
        confidence: top.score,
    })
}

fn polarity_of(label: &str) -> Polarity {
    let label = label.to_lowercase();
    if label.contains("pos") {
        Polarity::Positive
    } else if label.contains("neg") {
        Polarity::Negative
    } else {
        Polarity::Neutral
    }
}
