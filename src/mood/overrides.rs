//! Keyword override rules checked before the classification model.
//!
//! Short idiomatic phrases ("hit the gym today") are often misread by a
//! general-purpose model, so literal triggers win when present.

use super::{MoodLabel, MoodVocabulary, VocabularyError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub mood: MoodLabel,
    pub keywords: Vec<String>,
}

impl OverrideRule {
    pub fn new(mood: &str, keywords: &[&str]) -> Self {
        OverrideRule {
            mood: MoodLabel::new(mood),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Returns the first keyword found in `lowercase_text`.
    fn first_hit(&self, lowercase_text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .find(|keyword| !keyword.is_empty() && lowercase_text.contains(keyword))
    }
}

/// A rule that fired, with the keyword responsible.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideMatch<'a> {
    pub mood: &'a MoodLabel,
    pub keyword: &'a str,
}

/// Ordered rules. Earlier rules have priority.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRules {
    rules: Vec<OverrideRule>,
}

impl OverrideRules {
    pub fn new(rules: Vec<OverrideRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| OverrideRule {
                keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                mood: rule.mood,
            })
            .collect();
        OverrideRules { rules }
    }

    pub fn default_rules() -> Vec<OverrideRule> {
        vec![
            OverrideRule::new("Angry", &["angry", "rage", "furious", "mad"]),
            OverrideRule::new("Gym", &["gym", "workout", "exercise", "lifting"]),
            OverrideRule::new("Party", &["party", "dance", "club"]),
            OverrideRule::new("Sad", &["sad", "depressed", "heartbroken", "crying"]),
            OverrideRule::new("Romantic", &["romantic", "in love", "crush"]),
            OverrideRule::new("Chill", &["chill", "relax", "calm down"]),
            OverrideRule::new("Peaceful", &["peaceful", "serene"]),
            OverrideRule::new("Motivational", &["motivated", "motivation", "hustle"]),
        ]
    }

    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    /// Every rule must point at a mood of `vocabulary`.
    pub fn validate(&self, vocabulary: &MoodVocabulary) -> Result<(), VocabularyError> {
        match self.rules.iter().find(|r| !vocabulary.contains(r.mood.as_str())) {
            Some(rule) => Err(VocabularyError::UnknownLabel(rule.mood.to_string())),
            None => Ok(()),
        }
    }

    /// First rule, in declared order, with any keyword inside `text`.
    pub fn first_match(&self, text: &str) -> Option<OverrideMatch<'_>> {
        let lowercase_text = text.to_lowercase();
        self.rules.iter().find_map(|rule| {
            rule.first_hit(&lowercase_text).map(|keyword| OverrideMatch {
                mood: &rule.mood,
                keyword,
            })
        })
    }
}

impl Default for OverrideRules {
    fn default() -> Self {
        OverrideRules::new(Self::default_rules())
    }
}
