use super::provider::{ClassificationError, ClassifierOutput, Polarity, TextClassifier};
use super::{MoodLabel, MoodVocabulary, OverrideRules, VocabularyError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

const POSITIVE_MOOD: &str = "Happy";
const NEGATIVE_MOOD: &str = "Sad";
const NEUTRAL_MOOD: &str = "Neutral";

/// How the model tier interprets the classification backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierMode {
    /// Rank the whole vocabulary in one zero-shot call.
    #[default]
    OpenVocabulary,
    /// Map a positive/negative sentiment to Happy/Sad, anything else to Neutral.
    BinarySentiment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    Override,
    Model,
}

impl DetectionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionSource::Override => "override",
            DetectionSource::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedMood {
    pub label: MoodLabel,
    pub glyph: String,
    pub source: DetectionSource,
}

impl DetectedMood {
    /// Glyph and label, e.g. "💪 Gym".
    pub fn display(&self) -> String {
        if self.glyph.is_empty() {
            self.label.to_string()
        } else {
            format!("{} {}", self.glyph, self.label)
        }
    }
}

pub struct MoodClassifier {
    vocabulary: Arc<MoodVocabulary>,
    overrides: Option<OverrideRules>,
    model: Arc<dyn TextClassifier>,
    mode: ClassifierMode,
    candidate_labels: Vec<String>,
}

impl MoodClassifier {
    /// Pass `overrides: None` to always go straight to the model.
    pub fn new(
        vocabulary: Arc<MoodVocabulary>,
        overrides: Option<OverrideRules>,
        model: Arc<dyn TextClassifier>,
        mode: ClassifierMode,
    ) -> Result<Self, VocabularyError> {
        if let Some(overrides) = &overrides {
            overrides.validate(&vocabulary)?;
        }
        if mode == ClassifierMode::BinarySentiment {
            for label in [POSITIVE_MOOD, NEGATIVE_MOOD, NEUTRAL_MOOD] {
                if !vocabulary.contains(label) {
                    return Err(VocabularyError::UnknownLabel(label.to_string()));
                }
            }
        }
        let candidate_labels = vocabulary.labels().map(|l| l.to_string()).collect();
        Ok(MoodClassifier {
            vocabulary,
            overrides,
            model,
            mode,
            candidate_labels,
        })
    }

    pub fn mode(&self) -> ClassifierMode {
        self.mode
    }

    pub fn vocabulary(&self) -> &MoodVocabulary {
        &self.vocabulary
    }

    pub async fn detect_mood(&self, text: &str) -> Result<DetectedMood, ClassificationError> {
        if let Some(hit) = self.overrides.as_ref().and_then(|o| o.first_match(text)) {
            debug!(mood = %hit.mood, keyword = hit.keyword, "Mood override matched");
            return Ok(self.detected(hit.mood.clone(), DetectionSource::Override));
        }

        let label = match self.mode {
            ClassifierMode::OpenVocabulary => {
                let output = self
                    .model
                    .classify(text, Some(&self.candidate_labels))
                    .await?;
                self.label_from_ranking(output)?
            }
            ClassifierMode::BinarySentiment => {
                let output = self.model.classify(text, None).await?;
                label_from_sentiment(output)?
            }
        };

        debug!(mood = %label, classifier = self.model.name(), "Mood detected by model");
        Ok(self.detected(label, DetectionSource::Model))
    }

    fn label_from_ranking(&self, output: ClassifierOutput) -> Result<MoodLabel, ClassificationError> {
        let ranked = match output {
            ClassifierOutput::Ranked(ranked) => ranked,
            ClassifierOutput::Sentiment { .. } => {
                return Err(ClassificationError::InvalidResponse(
                    "Expected ranked labels, got a sentiment".to_string(),
                ))
            }
        };

        // Ties keep the backend's order.
        let best = ranked
            .into_iter()
            .reduce(|best, candidate| {
                if candidate.score > best.score {
                    candidate
                } else {
                    best
                }
            })
            .ok_or_else(|| ClassificationError::InvalidResponse("No labels returned".to_string()))?;

        match self.vocabulary.get(&best.label) {
            Some(definition) => Ok(definition.label.clone()),
            None => Err(ClassificationError::UnknownLabel(best.label)),
        }
    }

    fn detected(&self, label: MoodLabel, source: DetectionSource) -> DetectedMood {
        DetectedMood {
            glyph: self.vocabulary.glyph_for(label.as_str()).to_string(),
            label,
            source,
        }
    }
}

fn label_from_sentiment(output: ClassifierOutput) -> Result<MoodLabel, ClassificationError> {
    match output {
        ClassifierOutput::Sentiment { polarity, .. } => Ok(MoodLabel::new(match polarity {
            Polarity::Positive => POSITIVE_MOOD,
            Polarity::Negative => NEGATIVE_MOOD,
            Polarity::Neutral => NEUTRAL_MOOD,
        })),
        ClassifierOutput::Ranked(_) => Err(ClassificationError::InvalidResponse(
            "Expected a sentiment, got ranked labels".to_string(),
        )),
    }
}
