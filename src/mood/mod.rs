//! Mood detection: the vocabulary, keyword overrides and the model tier.

mod classifier;
mod huggingface;
mod overrides;
mod provider;
mod vocabulary;

pub use classifier::{ClassifierMode, DetectedMood, DetectionSource, MoodClassifier};
pub use huggingface::{
    HuggingFaceClassifier, DEFAULT_INFERENCE_URL, DEFAULT_SENTIMENT_MODEL, DEFAULT_ZERO_SHOT_MODEL,
};
pub use overrides::{OverrideMatch, OverrideRule, OverrideRules};
pub use provider::{ClassificationError, ClassifierOutput, LabelScore, Polarity, TextClassifier};
pub use vocabulary::{MoodDefinition, MoodLabel, MoodVocabulary, VocabularyError};
