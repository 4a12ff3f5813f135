//! The mood vocabulary: which labels exist, how they display and which
//! descriptor predicate each one maps to.

use crate::catalog::Descriptor::{Danceability, Energy, Tempo, Valence};
use crate::recommend::{Condition, FilterPredicate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodLabel(String);

impl MoodLabel {
    pub fn new(label: impl Into<String>) -> Self {
        MoodLabel(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MoodLabel {
    fn from(value: &str) -> Self {
        MoodLabel::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodDefinition {
    pub label: MoodLabel,
    /// Decorative only, never used to pick tracks.
    #[serde(default)]
    pub glyph: String,
    #[serde(default)]
    pub predicate: FilterPredicate,
}

impl MoodDefinition {
    pub fn new(label: &str, glyph: &str, conditions: Vec<Condition>) -> Self {
        MoodDefinition {
            label: MoodLabel::new(label),
            glyph: glyph.to_string(),
            predicate: FilterPredicate::all(conditions),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum VocabularyError {
    #[error("Mood vocabulary is empty")]
    Empty,

    #[error("Mood \"{0}\" is defined more than once")]
    DuplicateLabel(String),

    #[error("Mood label cannot be blank")]
    BlankLabel,

    #[error("Mood \"{0}\" is referenced but not part of the vocabulary")]
    UnknownLabel(String),
}

#[derive(Debug, Clone)]
pub struct MoodVocabulary {
    moods: Vec<MoodDefinition>,
}

impl MoodVocabulary {
    pub fn new(moods: Vec<MoodDefinition>) -> Result<Self, VocabularyError> {
        if moods.is_empty() {
            return Err(VocabularyError::Empty);
        }
        let mut seen = HashSet::new();
        for mood in &moods {
            if mood.label.as_str().trim().is_empty() {
                return Err(VocabularyError::BlankLabel);
            }
            if !seen.insert(mood.label.as_str()) {
                return Err(VocabularyError::DuplicateLabel(mood.label.to_string()));
            }
        }
        Ok(MoodVocabulary { moods })
    }

    /// The twelve moods the service ships with.
    pub fn default_moods() -> Vec<MoodDefinition> {
        vec![
            MoodDefinition::new(
                "Happy",
                "😄",
                vec![Condition::above(Valence, 0.75), Condition::above(Energy, 0.60)],
            ),
            MoodDefinition::new(
                "Sad",
                "😢",
                vec![Condition::below(Valence, 0.35), Condition::below(Energy, 0.50)],
            ),
            MoodDefinition::new(
                "Neutral",
                "😐",
                vec![
                    Condition::between(Valence, 0.40, 0.60),
                    Condition::between(Energy, 0.40, 0.60),
                ],
            ),
            MoodDefinition::new(
                "Angry",
                "😡",
                vec![Condition::above(Energy, 0.85), Condition::below(Valence, 0.40)],
            ),
            MoodDefinition::new(
                "Romantic",
                "❤️",
                vec![
                    Condition::above(Valence, 0.65),
                    Condition::above(Danceability, 0.55),
                    Condition::below(Energy, 0.70),
                ],
            ),
            MoodDefinition::new(
                "Chill",
                "😌",
                vec![
                    Condition::below(Energy, 0.45),
                    Condition::above(Valence, 0.40),
                    Condition::between(Tempo, 60.0, 100.0),
                ],
            ),
            MoodDefinition::new(
                "Gym",
                "💪",
                vec![Condition::above(Energy, 0.85), Condition::above(Tempo, 120.0)],
            ),
            MoodDefinition::new(
                "Party",
                "🎉",
                vec![
                    Condition::above(Danceability, 0.75),
                    Condition::above(Energy, 0.75),
                    Condition::above(Tempo, 110.0),
                ],
            ),
            MoodDefinition::new(
                "Motivational",
                "⚡",
                vec![
                    Condition::above(Valence, 0.65),
                    Condition::above(Energy, 0.65),
                    Condition::above(Tempo, 100.0),
                ],
            ),
            MoodDefinition::new(
                "Melancholic",
                "🌧",
                vec![
                    Condition::below(Valence, 0.45),
                    Condition::between(Energy, 0.30, 0.60),
                    Condition::between(Tempo, 60.0, 110.0),
                ],
            ),
            MoodDefinition::new(
                "Confident",
                "😎",
                vec![
                    Condition::above(Energy, 0.70),
                    Condition::above(Valence, 0.50),
                    Condition::above(Danceability, 0.60),
                    Condition::above(Tempo, 100.0),
                ],
            ),
            MoodDefinition::new(
                "Peaceful",
                "🌅",
                vec![
                    Condition::below(Energy, 0.40),
                    Condition::between(Valence, 0.50, 0.80),
                    Condition::between(Tempo, 60.0, 90.0),
                ],
            ),
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoodDefinition> {
        self.moods.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &MoodLabel> {
        self.moods.iter().map(|m| &m.label)
    }

    pub fn len(&self) -> usize {
        self.moods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, label: &str) -> Option<&MoodDefinition> {
        self.moods.iter().find(|m| m.label.as_str() == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn glyph_for(&self, label: &str) -> &str {
        self.get(label).map(|m| m.glyph.as_str()).unwrap_or("")
    }

    /// Unregistered labels resolve to the identity predicate.
    pub fn predicate_for(&self, label: &str) -> &FilterPredicate {
        self.get(label)
            .map(|m| &m.predicate)
            .unwrap_or_else(|| FilterPredicate::identity())
    }
}

impl Default for MoodVocabulary {
    fn default() -> Self {
        MoodVocabulary {
            moods: Self::default_moods(),
        }
    }
}
