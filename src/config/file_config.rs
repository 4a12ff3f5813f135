use crate::mood::{MoodDefinition, OverrideRule};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub catalog_path: Option<String>,
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,

    // Feature configs
    pub classifier: Option<ClassifierConfig>,
    pub video_search: Option<VideoSearchConfig>,
    pub recommend: Option<RecommendConfig>,

    /// Replaces the built-in mood vocabulary when present.
    pub moods: Option<Vec<MoodDefinition>>,
    /// Replaces the built-in keyword overrides when present.
    pub overrides: Option<Vec<OverrideRule>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ClassifierConfig {
    /// "open-vocabulary" or "binary-sentiment"
    pub mode: Option<String>,
    pub url: Option<String>,
    pub model: Option<String>,
    pub api_token: Option<String>,
    pub timeout_sec: Option<u64>,
    pub overrides_enabled: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct VideoSearchConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub max_results: Option<usize>,
    pub timeout_sec: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct RecommendConfig {
    pub sample_size: Option<usize>,
    pub seed: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
