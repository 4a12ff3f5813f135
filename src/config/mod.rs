mod file_config;

pub use file_config::{ClassifierConfig, FileConfig, RecommendConfig, VideoSearchConfig};

use crate::mood::{
    ClassifierMode, MoodVocabulary, OverrideRule, OverrideRules, DEFAULT_INFERENCE_URL,
    DEFAULT_SENTIMENT_MODEL, DEFAULT_ZERO_SHOT_MODEL,
};
use crate::recommend::DEFAULT_SAMPLE_SIZE;
use crate::server::RequestsLoggingLevel;
use crate::video::{DEFAULT_MAX_RESULTS, DEFAULT_YOUTUBE_API_URL};
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// The YouTube search endpoint refuses larger pages.
const MAX_SEARCH_RESULTS: usize = 50;

pub fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

/// Arguments shared by the server and the command-line client.
#[derive(clap::Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// CSV file with the track catalog.
    /// Can also be specified in config file.
    #[clap(long, value_parser = parse_path)]
    pub catalog_path: Option<PathBuf>,

    /// How the classification model is used.
    #[clap(long, default_value = "open-vocabulary")]
    pub classifier_mode: ClassifierMode,

    /// Base URL of the Hugging Face inference API.
    #[clap(long, default_value = DEFAULT_INFERENCE_URL)]
    pub classifier_url: String,

    /// Model id. Defaults to a zero-shot or a sentiment model depending on the mode.
    #[clap(long)]
    pub classifier_model: Option<String>,

    /// Hugging Face API token.
    #[clap(long, env = "HF_API_TOKEN", hide_env_values = true)]
    pub hf_api_token: Option<String>,

    /// Timeout in seconds for classification requests.
    #[clap(long, default_value_t = 30)]
    pub classifier_timeout_sec: u64,

    /// Always ask the model, ignoring keyword overrides.
    #[clap(long)]
    pub disable_overrides: bool,

    /// Base URL of the YouTube Data API.
    #[clap(long, default_value = DEFAULT_YOUTUBE_API_URL)]
    pub youtube_api_url: String,

    /// YouTube Data API key.
    #[clap(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_api_key: Option<String>,

    /// Number of search results considered per track.
    #[clap(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub video_max_results: usize,

    /// Timeout in seconds for a single preview lookup.
    #[clap(long, default_value_t = 10)]
    pub video_timeout_sec: u64,

    /// Maximum number of tracks per recommendation.
    #[clap(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Seed for track sampling, makes results reproducible.
    #[clap(long)]
    pub seed: Option<u64>,
}

impl ServiceArgs {
    pub fn load_file_config(&self) -> Result<Option<FileConfig>> {
        match &self.config {
            Some(path) => Ok(Some(FileConfig::load(path)?)),
            None => Ok(None),
        }
    }
}

/// Convert shared CLI args to CliConfig for config resolution.
/// Server-only fields keep their defaults.
impl From<&ServiceArgs> for CliConfig {
    fn from(args: &ServiceArgs) -> Self {
        CliConfig {
            catalog_path: args.catalog_path.clone(),
            classifier_mode: args.classifier_mode,
            classifier_url: args.classifier_url.clone(),
            classifier_model: args.classifier_model.clone(),
            hf_api_token: args.hf_api_token.clone(),
            classifier_timeout_sec: args.classifier_timeout_sec,
            disable_overrides: args.disable_overrides,
            youtube_api_url: args.youtube_api_url.clone(),
            youtube_api_key: args.youtube_api_key.clone(),
            video_max_results: args.video_max_results,
            video_timeout_sec: args.video_timeout_sec,
            sample_size: args.sample_size,
            seed: args.seed,
            ..Default::default()
        }
    }
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub catalog_path: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub classifier_mode: ClassifierMode,
    pub classifier_url: String,
    pub classifier_model: Option<String>,
    pub hf_api_token: Option<String>,
    pub classifier_timeout_sec: u64,
    pub disable_overrides: bool,
    pub youtube_api_url: String,
    pub youtube_api_key: Option<String>,
    pub video_max_results: usize,
    pub video_timeout_sec: u64,
    pub sample_size: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub catalog_path: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,

    // Feature configs
    pub classifier: ClassifierSettings,
    pub video_search: VideoSearchSettings,
    pub recommend: RecommendSettings,

    pub vocabulary: MoodVocabulary,
    pub overrides: OverrideRules,
}

#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub mode: ClassifierMode,
    pub url: String,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout_sec: u64,
    pub overrides_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct VideoSearchSettings {
    pub url: String,
    pub api_key: String,
    pub max_results: usize,
    pub timeout_sec: u64,
}

#[derive(Debug, Clone)]
pub struct RecommendSettings {
    pub sample_size: usize,
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_path = file
            .catalog_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "catalog_path must be specified via --catalog-path or in config file"
                )
            })?;
        validate_catalog_path(&catalog_path)?;

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        // Classifier settings - [classifier] section over CLI
        let classifier_file = file.classifier.unwrap_or_default();
        let mode = match classifier_file.mode {
            Some(s) => parse_classifier_mode(&s)
                .ok_or_else(|| anyhow::anyhow!("Unknown classifier mode: {}", s))?,
            None => cli.classifier_mode,
        };
        let model = classifier_file
            .model
            .or_else(|| cli.classifier_model.clone())
            .unwrap_or_else(|| default_model(mode).to_string());
        let classifier = ClassifierSettings {
            mode,
            url: classifier_file
                .url
                .unwrap_or_else(|| cli.classifier_url.clone()),
            model,
            api_token: classifier_file
                .api_token
                .or_else(|| cli.hf_api_token.clone()),
            timeout_sec: classifier_file
                .timeout_sec
                .unwrap_or(cli.classifier_timeout_sec),
            overrides_enabled: classifier_file
                .overrides_enabled
                .unwrap_or(!cli.disable_overrides),
        };

        // Video search settings
        let search_file = file.video_search.unwrap_or_default();
        let api_key = search_file
            .api_key
            .or_else(|| cli.youtube_api_key.clone())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "A YouTube API key must be specified via --youtube-api-key, \
                     YOUTUBE_API_KEY or [video_search] api_key"
                )
            })?;
        let max_results = search_file.max_results.unwrap_or(cli.video_max_results);
        if max_results == 0 || max_results > MAX_SEARCH_RESULTS {
            bail!(
                "video_search max_results must be between 1 and {}, got {}",
                MAX_SEARCH_RESULTS,
                max_results
            );
        }
        let video_search = VideoSearchSettings {
            url: search_file
                .url
                .unwrap_or_else(|| cli.youtube_api_url.clone()),
            api_key,
            max_results,
            timeout_sec: search_file.timeout_sec.unwrap_or(cli.video_timeout_sec),
        };

        let recommend_file = file.recommend.unwrap_or_default();
        let recommend = RecommendSettings {
            sample_size: recommend_file.sample_size.unwrap_or(cli.sample_size),
            seed: recommend_file.seed.or(cli.seed),
        };
        if recommend.sample_size == 0 {
            bail!("recommend sample_size must be at least 1");
        }

        let vocabulary = match file.moods {
            Some(moods) => MoodVocabulary::new(moods).context("Invalid [[moods]] in config file")?,
            None => MoodVocabulary::default(),
        };
        let overrides = match file.overrides {
            Some(rules) => OverrideRules::new(rules),
            None => default_overrides_for(&vocabulary),
        };
        overrides
            .validate(&vocabulary)
            .context("Invalid [[overrides]] in config file")?;

        Ok(Self {
            catalog_path,
            port,
            metrics_port,
            logging_level,
            classifier,
            video_search,
            recommend,
            vocabulary,
            overrides,
        })
    }
}

fn validate_catalog_path(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Catalog file does not exist: {:?}", path);
    }
    if !path.is_file() {
        bail!("catalog_path is not a file: {:?}", path);
    }
    Ok(())
}

fn default_model(mode: ClassifierMode) -> &'static str {
    match mode {
        ClassifierMode::OpenVocabulary => DEFAULT_ZERO_SHOT_MODEL,
        ClassifierMode::BinarySentiment => DEFAULT_SENTIMENT_MODEL,
    }
}

/// Built-in rules, minus those pointing at moods a custom vocabulary dropped.
fn default_overrides_for(vocabulary: &MoodVocabulary) -> OverrideRules {
    let rules: Vec<OverrideRule> = OverrideRules::default_rules()
        .into_iter()
        .filter(|rule| vocabulary.contains(rule.mood.as_str()))
        .collect();
    OverrideRules::new(rules)
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

fn parse_classifier_mode(s: &str) -> Option<ClassifierMode> {
    ClassifierMode::from_str(s, true).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodDefinition;
    use tempfile::NamedTempFile;

    fn make_temp_catalog() -> NamedTempFile {
        NamedTempFile::new().unwrap()
    }

    fn cli_with(catalog: &NamedTempFile) -> CliConfig {
        CliConfig {
            catalog_path: Some(catalog.path().to_path_buf()),
            port: 3001,
            metrics_port: 9091,
            classifier_url: DEFAULT_INFERENCE_URL.to_string(),
            classifier_timeout_sec: 30,
            youtube_api_url: DEFAULT_YOUTUBE_API_URL.to_string(),
            youtube_api_key: Some("cli-key".to_string()),
            video_max_results: DEFAULT_MAX_RESULTS,
            video_timeout_sec: 10,
            sample_size: DEFAULT_SAMPLE_SIZE,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_logging_level() {
        assert!(matches!(
            parse_logging_level("none"),
            Some(RequestsLoggingLevel::None)
        ));
        assert!(matches!(
            parse_logging_level("BODY"),
            Some(RequestsLoggingLevel::Body)
        ));
        assert!(parse_logging_level("invalid").is_none());
    }

    #[test]
    fn test_parse_classifier_mode() {
        assert_eq!(
            parse_classifier_mode("open-vocabulary"),
            Some(ClassifierMode::OpenVocabulary)
        );
        assert_eq!(
            parse_classifier_mode("Binary-Sentiment"),
            Some(ClassifierMode::BinarySentiment)
        );
        assert!(parse_classifier_mode("zero-shot").is_none());
    }

    #[test]
    fn test_resolve_cli_only() {
        let catalog = make_temp_catalog();
        let config = AppConfig::resolve(&cli_with(&catalog), None).unwrap();

        assert_eq!(config.catalog_path, catalog.path());
        assert_eq!(config.port, 3001);
        assert_eq!(config.metrics_port, 9091);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Path);
        assert_eq!(config.classifier.mode, ClassifierMode::OpenVocabulary);
        assert_eq!(config.classifier.model, DEFAULT_ZERO_SHOT_MODEL);
        assert!(config.classifier.overrides_enabled);
        assert!(config.classifier.api_token.is_none());
        assert_eq!(config.video_search.api_key, "cli-key");
        assert_eq!(config.video_search.max_results, 10);
        assert_eq!(config.recommend.sample_size, 5);
        assert_eq!(config.recommend.seed, None);
        assert_eq!(config.vocabulary.len(), 12);
        assert_eq!(config.overrides.rules().len(), 8);
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let catalog = make_temp_catalog();
        let cli = CliConfig {
            catalog_path: Some(PathBuf::from("/should/be/overridden.csv")),
            seed: Some(1),
            ..cli_with(&catalog)
        };

        let file_config = FileConfig {
            catalog_path: Some(catalog.path().to_string_lossy().to_string()),
            port: Some(4000),
            logging_level: Some("body".to_string()),
            classifier: Some(ClassifierConfig {
                mode: Some("binary-sentiment".to_string()),
                overrides_enabled: Some(false),
                ..Default::default()
            }),
            video_search: Some(VideoSearchConfig {
                api_key: Some("toml-key".to_string()),
                ..Default::default()
            }),
            recommend: Some(RecommendConfig {
                sample_size: Some(3),
                seed: None,
            }),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(config.catalog_path, catalog.path());
        assert_eq!(config.port, 4000);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Body);
        assert_eq!(config.classifier.mode, ClassifierMode::BinarySentiment);
        assert_eq!(config.classifier.model, DEFAULT_SENTIMENT_MODEL);
        assert!(!config.classifier.overrides_enabled);
        assert_eq!(config.video_search.api_key, "toml-key");
        assert_eq!(config.recommend.sample_size, 3);
        // CLI value used when TOML doesn't specify
        assert_eq!(config.metrics_port, 9091);
        assert_eq!(config.recommend.seed, Some(1));
    }

    #[test]
    fn test_resolve_missing_catalog_path_error() {
        let catalog = make_temp_catalog();
        let cli = CliConfig {
            catalog_path: None,
            ..cli_with(&catalog)
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("catalog_path must be specified"));
    }

    #[test]
    fn test_resolve_nonexistent_catalog_error() {
        let catalog = make_temp_catalog();
        let cli = CliConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/path/tracks.csv")),
            ..cli_with(&catalog)
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_catalog_is_directory_error() {
        let catalog = make_temp_catalog();
        let dir = tempfile::TempDir::new().unwrap();
        let cli = CliConfig {
            catalog_path: Some(dir.path().to_path_buf()),
            ..cli_with(&catalog)
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("not a file"));
    }

    #[test]
    fn test_resolve_requires_youtube_key() {
        let catalog = make_temp_catalog();
        for key in [None, Some("  ".to_string())] {
            let cli = CliConfig {
                youtube_api_key: key,
                ..cli_with(&catalog)
            };
            let result = AppConfig::resolve(&cli, None);
            assert!(result.unwrap_err().to_string().contains("YouTube API key"));
        }
    }

    #[test]
    fn test_resolve_rejects_bad_limits() {
        let catalog = make_temp_catalog();
        let cli = CliConfig {
            video_max_results: 51,
            ..cli_with(&catalog)
        };
        assert!(AppConfig::resolve(&cli, None).is_err());

        let cli = CliConfig {
            sample_size: 0,
            ..cli_with(&catalog)
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_resolve_unknown_mode_error() {
        let catalog = make_temp_catalog();
        let file_config = FileConfig {
            classifier: Some(ClassifierConfig {
                mode: Some("telepathy".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli_with(&catalog), Some(file_config));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown classifier mode"));
    }

    #[test]
    fn test_custom_vocabulary_keeps_only_matching_default_overrides() {
        let catalog = make_temp_catalog();
        let file_config = FileConfig {
            moods: Some(vec![
                MoodDefinition::new("Gym", "💪", vec![]),
                MoodDefinition::new("Focus", "🎯", vec![]),
            ]),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli_with(&catalog), Some(file_config)).unwrap();
        assert_eq!(config.vocabulary.len(), 2);
        let moods: Vec<&str> = config
            .overrides
            .rules()
            .iter()
            .map(|r| r.mood.as_str())
            .collect();
        assert_eq!(moods, vec!["Gym"]);
    }

    #[test]
    fn test_overrides_must_reference_vocabulary() {
        let catalog = make_temp_catalog();
        let file_config = FileConfig {
            overrides: Some(vec![OverrideRule::new("Nostalgic", &["memories"])]),
            ..Default::default()
        };
        let err = AppConfig::resolve(&cli_with(&catalog), Some(file_config)).unwrap_err();
        assert!(err.to_string().contains("Invalid [[overrides]]"));
    }

    #[test]
    fn test_duplicate_moods_rejected() {
        let catalog = make_temp_catalog();
        let file_config = FileConfig {
            moods: Some(vec![
                MoodDefinition::new("Gym", "", vec![]),
                MoodDefinition::new("Gym", "", vec![]),
            ]),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli_with(&catalog), Some(file_config)).is_err());
    }
}
